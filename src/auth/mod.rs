pub mod requests;
pub mod responses;
pub mod utils;

use crate::{
    database::with_conn,
    error::ScheduleError,
    models::{user_logins::UserLoginData, users::UserData},
    protocol::SimpleResponse,
    utils::{generate_login_token, hash_password},
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::{Duration, NaiveDateTime, Utc};
use diesel::prelude::*;
use log::info;

use self::{requests::*, responses::*, utils::MAX_LOGIN_TIME_SECS};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(logout).service(session);
}

crate::post_funcs! {
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (session, "/session", SessionRequest, SessionResponse),
}

/// Checks the credentials and records a new login. Expired logins of the
/// same user are dropped on the way.
pub fn login_user(
    conn: &SqliteConnection,
    username: &str,
    password: &str,
    now: NaiveDateTime,
) -> anyhow::Result<(String, UserData)> {
    use crate::schema::{user_logins, users};

    conn.transaction::<_, anyhow::Error, _>(|| {
        let user = users::table
            .filter(users::username.eq(username))
            .filter(users::password.eq(hash_password(password)))
            .get_result::<UserData>(conn)
            .optional()
            .context("DB error")?;
        let user = match user {
            Some(user) => user,
            None => bail!(ScheduleError::Unauthorized(
                "Wrong username or password".to_string()
            )),
        };
        if !user.is_active {
            bail!(ScheduleError::Unauthorized("User is disabled".to_string()));
        }

        let expired_before = now - Duration::seconds(MAX_LOGIN_TIME_SECS);
        diesel::delete(
            user_logins::table
                .filter(user_logins::uid.eq(user.id))
                .filter(user_logins::login_time.lt(expired_before)),
        )
        .execute(conn)
        .context("DB error")?;

        let login_token = generate_login_token(user.id);
        diesel::insert_into(user_logins::table)
            .values(UserLoginData {
                token: login_token.clone(),
                uid: user.id,
                login_time: now,
            })
            .execute(conn)
            .context("DB error")?;

        Ok((login_token, user))
    })
}

async fn login_impl(
    pool: web::Data<DbPool>,
    info: web::Json<LoginRequest>,
) -> anyhow::Result<LoginResponse> {
    let info = info.into_inner();
    let (login_token, user) = with_conn(&pool, move |conn| {
        login_user(conn, &info.username, &info.password, Utc::now().naive_utc())
    })
    .await?;
    info!("user {} logged in", user.username);

    Ok(LoginResponse {
        success: true,
        login_token,
        user: user.into(),
        ..Default::default()
    })
}

async fn logout_impl(
    pool: web::Data<DbPool>,
    info: web::Json<LogoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::user_logins;

    let info = info.into_inner();
    with_conn(&pool, move |conn| {
        diesel::delete(user_logins::table.filter(user_logins::token.eq(info.login_token)))
            .execute(conn)
            .context("DB error")
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn session_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SessionRequest>,
) -> anyhow::Result<SessionResponse> {
    let info = info.into_inner();
    let user = with_conn(&pool, move |conn| {
        utils::user_for_token(conn, &info.login_token, Utc::now().naive_utc())
    })
    .await?;

    Ok(SessionResponse {
        success: true,
        logged_in: user.is_some(),
        user: user.map(UserItem::from),
        ..Default::default()
    })
}
