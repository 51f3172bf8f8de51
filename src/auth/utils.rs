use actix_web::web;
use anyhow::{bail, Context};
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::{
    database::with_conn, error::ScheduleError, models::user_logins::UserLoginData,
    models::users::UserData, DbPool,
};

pub const MAX_LOGIN_TIME_SECS: i64 = 3600;

/// The active user behind `token`, or `None` for unknown, expired and
/// disabled logins.
pub fn user_for_token(
    conn: &SqliteConnection,
    token: &str,
    now: NaiveDateTime,
) -> anyhow::Result<Option<UserData>> {
    use crate::schema::{user_logins, users};

    let data = user_logins::table
        .filter(user_logins::token.eq(token))
        .order(user_logins::login_time.desc())
        .limit(1)
        .get_result::<UserLoginData>(conn)
        .optional()
        .context("DB error")?;

    let data = match data {
        Some(data) => data,
        None => return Ok(None),
    };
    if now.signed_duration_since(data.login_time).num_seconds() > MAX_LOGIN_TIME_SECS {
        return Ok(None);
    }

    let user = users::table
        .filter(users::id.eq(data.uid))
        .filter(users::is_active.eq(true))
        .get_result::<UserData>(conn)
        .optional()
        .context("DB error")?;
    Ok(user)
}

pub fn uid_for_token(conn: &SqliteConnection, token: &str) -> anyhow::Result<i32> {
    match user_for_token(conn, token, Utc::now().naive_utc())? {
        Some(user) => Ok(user.id),
        None => bail!(ScheduleError::Unauthorized(
            "Not logged in or login has expired".to_string()
        )),
    }
}

/// Resolves the acting user of an admin request.
pub async fn get_uid_from_token(token: String, pool: &web::Data<DbPool>) -> anyhow::Result<i32> {
    with_conn(pool, move |conn| uid_for_token(conn, &token)).await
}
