use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;
use log::info;

use super::{requests::*, responses::*};
use crate::{
    auth::{responses::UserItem, utils::get_uid_from_token},
    database::{assert, with_conn},
    error::ScheduleError,
    models::users::{NewUser, UpdateUser, UserData, ROLE_ADMIN},
    protocol::SimpleResponse,
    utils::{get_str_pattern_opt, hash_password, non_blank, require, text_change},
    DbPool,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_user)
        .service(search_user)
        .service(modify_user)
        .service(delete_user);
}

crate::post_funcs! {
    (add_user, "/add_user", AddUserRequest, IdResponse),
    (search_user, "/search_user", SearchUserRequest, SearchUserResponse),
    (modify_user, "/modify_user", ModifyUserRequest, SimpleResponse),
    (delete_user, "/delete_user", DeleteUserRequest, SimpleResponse),
}

pub fn create_user(conn: &SqliteConnection, info: AddUserRequest) -> anyhow::Result<i32> {
    use crate::schema::users;

    let username = require(info.username, "username")?;
    let password = require(info.password, "password")?;
    let data = NewUser {
        username: username.clone(),
        display_name: non_blank(info.display_name),
        password: hash_password(&password),
        role: non_blank(info.role).unwrap_or_else(|| ROLE_ADMIN.to_string()),
        is_active: info.is_active.unwrap_or(true),
        created_at: Utc::now().naive_utc(),
    };

    conn.transaction::<_, anyhow::Error, _>(|| {
        assert::assert_username_free(conn, &username, None)?;

        diesel::insert_into(users::table)
            .values(data)
            .execute(conn)
            .context("DB error")?;

        users::table
            .filter(users::username.eq(&username))
            .select(users::id)
            .first(conn)
            .context("DB error")
    })
}

pub fn update_user(conn: &SqliteConnection, info: ModifyUserRequest, actor: i32) -> anyhow::Result<()> {
    use crate::schema::users;

    let uid = info.id;
    if uid == actor && info.is_active == Some(false) {
        bail!(ScheduleError::validation("Cannot disable your own account"));
    }
    let username = match info.username {
        Some(username) => Some(require(Some(username), "username")?),
        None => None,
    };
    let data = UpdateUser {
        username,
        display_name: text_change(info.display_name),
        password: non_blank(info.password).map(|password| hash_password(&password)),
        role: non_blank(info.role),
        is_active: info.is_active,
    };

    conn.transaction::<_, anyhow::Error, _>(|| {
        assert::assert_user(conn, uid)?;
        if data.is_empty() {
            return Ok(());
        }
        if let Some(username) = &data.username {
            assert::assert_username_free(conn, username, Some(uid))?;
        }

        diesel::update(users::table.filter(users::id.eq(uid)))
            .set(&data)
            .execute(conn)
            .context("DB error")?;
        Ok(())
    })
}

pub fn remove_user(conn: &SqliteConnection, uid: i32, actor: i32) -> anyhow::Result<()> {
    use crate::schema::users;

    if uid == actor {
        bail!(ScheduleError::validation("Cannot delete your own account"));
    }
    let deleted = diesel::delete(users::table.filter(users::id.eq(uid)))
        .execute(conn)
        .context("DB error")?;
    if deleted == 0 {
        bail!(ScheduleError::not_found("User not found"));
    }
    Ok(())
}

async fn add_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddUserRequest>,
) -> anyhow::Result<IdResponse> {
    let info = info.into_inner();
    let actor = get_uid_from_token(info.login_token.clone(), &pool).await?;

    let id = with_conn(&pool, move |conn| create_user(conn, info)).await?;
    info!("user {} created by {}", id, actor);

    Ok(IdResponse {
        success: true,
        id,
        ..Default::default()
    })
}

async fn search_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchUserRequest>,
) -> anyhow::Result<SearchUserResponse> {
    use crate::schema::users;

    let info = info.into_inner();
    get_uid_from_token(info.login_token.clone(), &pool).await?;

    let username_pattern = get_str_pattern_opt(info.username);
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(50).max(0);
    let usrs = with_conn(&pool, move |conn| {
        users::table
            .filter(users::username.like(username_pattern))
            .order(users::username.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<UserData>(conn)
            .context("DB error")
    })
    .await?;

    Ok(SearchUserResponse {
        success: true,
        users: usrs.into_iter().map(UserItem::from).collect(),
        ..Default::default()
    })
}

async fn modify_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyUserRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    let actor = get_uid_from_token(info.login_token.clone(), &pool).await?;

    with_conn(&pool, move |conn| update_user(conn, info, actor)).await?;

    Ok(SimpleResponse::ok())
}

async fn delete_user_impl(
    pool: web::Data<DbPool>,
    info: web::Json<DeleteUserRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    let actor = get_uid_from_token(info.login_token.clone(), &pool).await?;

    let uid = info.id;
    with_conn(&pool, move |conn| remove_user(conn, uid, actor)).await?;
    info!("user {} deleted by {}", uid, actor);

    Ok(SimpleResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::login_user, database::memory_conn, error::error_kind, testing::add_user};

    fn find(conn: &SqliteConnection, uid: i32) -> UserData {
        use crate::schema::users;

        users::table.filter(users::id.eq(uid)).get_result(conn).unwrap()
    }

    #[test]
    fn created_users_can_log_in() {
        let conn = memory_conn();
        let id = create_user(
            &conn,
            AddUserRequest {
                username: Some(" carol ".to_string()),
                password: Some("secret".to_string()),
                display_name: Some("".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let user = find(&conn, id);
        assert_eq!(user.username, "carol");
        assert_eq!(user.display_name, None);
        assert_eq!(user.role, ROLE_ADMIN);
        assert!(login_user(&conn, "carol", "secret", Utc::now().naive_utc()).is_ok());
    }

    #[test]
    fn usernames_are_unique() {
        let conn = memory_conn();
        add_user(&conn, "alice");
        let err = create_user(
            &conn,
            AddUserRequest {
                username: Some("alice".to_string()),
                password: Some("x".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(error_kind(&err), "validation");
    }

    #[test]
    fn modify_rehashes_only_given_password() {
        let conn = memory_conn();
        let actor = add_user(&conn, "alice");
        let bob = add_user(&conn, "bob");
        let before = find(&conn, bob).password;

        update_user(
            &conn,
            ModifyUserRequest {
                id: bob,
                display_name: Some("Bobby".to_string()),
                ..Default::default()
            },
            actor,
        )
        .unwrap();
        let user = find(&conn, bob);
        assert_eq!(user.password, before);
        assert_eq!(user.shown_name(), "Bobby");

        update_user(
            &conn,
            ModifyUserRequest {
                id: bob,
                password: Some("new".to_string()),
                ..Default::default()
            },
            actor,
        )
        .unwrap();
        assert_eq!(find(&conn, bob).password, hash_password("new"));
    }

    #[test]
    fn cannot_delete_or_disable_self() {
        let conn = memory_conn();
        let actor = add_user(&conn, "alice");

        let err = remove_user(&conn, actor, actor).unwrap_err();
        assert_eq!(error_kind(&err), "validation");
        let err = update_user(
            &conn,
            ModifyUserRequest {
                id: actor,
                is_active: Some(false),
                ..Default::default()
            },
            actor,
        )
        .unwrap_err();
        assert_eq!(error_kind(&err), "validation");
    }

    #[test]
    fn deleting_unknown_user_is_not_found() {
        let conn = memory_conn();
        let actor = add_user(&conn, "alice");
        let err = remove_user(&conn, actor + 100, actor).unwrap_err();
        assert_eq!(error_kind(&err), "not_found");
    }
}
