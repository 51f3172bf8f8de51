use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;
use log::info;

use super::{requests::*, responses::*};
use crate::{
    auth::utils::get_uid_from_token,
    database::{assert, with_conn},
    error::ScheduleError,
    models::assignees::{AssigneeData, NewAssignee, UpdateAssignee, KINDS, KIND_DJ},
    protocol::SimpleResponse,
    utils::{get_str_pattern_opt, non_blank, require, text_change},
    DbPool,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_assignee)
        .service(search_assignee)
        .service(modify_assignee)
        .service(delete_assignee);
}

crate::post_funcs! {
    (add_assignee, "/add_assignee", AddAssigneeRequest, IdResponse),
    (search_assignee, "/search_assignee", SearchAssigneeRequest, SearchAssigneeResponse),
    (modify_assignee, "/modify_assignee", ModifyAssigneeRequest, SimpleResponse),
    (delete_assignee, "/delete_assignee", DeleteAssigneeRequest, SimpleResponse),
}

fn parse_kind(kind: Option<String>) -> anyhow::Result<Option<String>> {
    match non_blank(kind) {
        Some(kind) if KINDS.contains(&kind.as_str()) => Ok(Some(kind)),
        Some(kind) => bail!(ScheduleError::validation(format!(
            "kind must be one of {:?}, got {:?}",
            KINDS, kind
        ))),
        None => Ok(None),
    }
}

/// At most one assignee carries the default flag.
fn clear_other_defaults(conn: &SqliteConnection, keep: i32) -> anyhow::Result<()> {
    use crate::schema::assignees;

    diesel::update(
        assignees::table
            .filter(assignees::id.ne(keep))
            .filter(assignees::is_default.eq(true)),
    )
    .set(assignees::is_default.eq(false))
    .execute(conn)
    .context("DB error")?;
    Ok(())
}

pub fn create_assignee(
    conn: &SqliteConnection,
    info: AddAssigneeRequest,
    actor: i32,
) -> anyhow::Result<i32> {
    use crate::schema::assignees;

    let name = require(info.name, "name")?;
    let is_default = info.is_default.unwrap_or(false);
    let now = Utc::now().naive_utc();
    let data = NewAssignee {
        name: name.clone(),
        kind: parse_kind(info.kind)?.unwrap_or_else(|| KIND_DJ.to_string()),
        description: non_blank(info.description),
        contact_name: non_blank(info.contact_name),
        contact_phone: non_blank(info.contact_phone),
        contact_email: non_blank(info.contact_email),
        instagram: non_blank(info.instagram),
        color: non_blank(info.color),
        is_active: info.is_active.unwrap_or(true),
        is_default,
        created_by: Some(actor),
        updated_by: Some(actor),
        created_at: now,
        updated_at: now,
    };

    conn.transaction::<_, anyhow::Error, _>(|| {
        assert::assert_assignee_name_free(conn, &name, None)?;

        diesel::insert_into(assignees::table)
            .values(data)
            .execute(conn)
            .context("DB error")?;
        let id = assignees::table
            .filter(assignees::name.eq(&name))
            .select(assignees::id)
            .first(conn)
            .context("DB error")?;

        if is_default {
            clear_other_defaults(conn, id)?;
        }
        Ok(id)
    })
}

pub fn update_assignee(
    conn: &SqliteConnection,
    info: ModifyAssigneeRequest,
    actor: i32,
) -> anyhow::Result<()> {
    use crate::schema::assignees;

    let id = info.id;
    let name = match info.name {
        Some(name) => Some(require(Some(name), "name")?),
        None => None,
    };
    let data = UpdateAssignee {
        name,
        kind: parse_kind(info.kind)?,
        description: text_change(info.description),
        contact_name: text_change(info.contact_name),
        contact_phone: text_change(info.contact_phone),
        contact_email: text_change(info.contact_email),
        instagram: text_change(info.instagram),
        color: text_change(info.color),
        is_active: info.is_active,
        is_default: info.is_default,
        updated_by: Some(actor),
        updated_at: Utc::now().naive_utc(),
    };

    conn.transaction::<_, anyhow::Error, _>(|| {
        assert::assert_assignee(conn, id)?;
        if let Some(name) = &data.name {
            assert::assert_assignee_name_free(conn, name, Some(id))?;
        }

        diesel::update(assignees::table.filter(assignees::id.eq(id)))
            .set(&data)
            .execute(conn)
            .context("DB error")?;

        if data.is_default == Some(true) {
            clear_other_defaults(conn, id)?;
        }
        Ok(())
    })
}

/// Removes the assignee; slots it held become unassigned.
pub fn remove_assignee(conn: &SqliteConnection, id: i32) -> anyhow::Result<usize> {
    use crate::schema::{assignees, schedule_entries};

    conn.transaction::<_, anyhow::Error, _>(|| {
        assert::assert_assignee(conn, id)?;

        let released = diesel::update(
            schedule_entries::table.filter(schedule_entries::assignee_id.eq(id)),
        )
        .set(schedule_entries::assignee_id.eq(None::<i32>))
        .execute(conn)
        .context("DB error")?;

        diesel::delete(assignees::table.filter(assignees::id.eq(id)))
            .execute(conn)
            .context("DB error")?;
        Ok(released)
    })
}

pub fn find_assignees(
    conn: &SqliteConnection,
    info: SearchAssigneeRequest,
) -> anyhow::Result<Vec<AssigneeData>> {
    use crate::schema::assignees;

    let kind = parse_kind(info.kind)?;
    let mut query = assignees::table
        .filter(assignees::name.like(get_str_pattern_opt(info.name)))
        .into_boxed();
    if let Some(kind) = kind {
        query = query.filter(assignees::kind.eq(kind));
    }
    if info.active_only.unwrap_or(false) {
        query = query.filter(assignees::is_active.eq(true));
    }

    query
        .order(assignees::name.asc())
        .offset(info.first_index.unwrap_or(0).max(0))
        .limit(info.limit.unwrap_or(100).max(0))
        .get_results::<AssigneeData>(conn)
        .context("DB error")
}

async fn add_assignee_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddAssigneeRequest>,
) -> anyhow::Result<IdResponse> {
    let info = info.into_inner();
    let actor = get_uid_from_token(info.login_token.clone(), &pool).await?;

    let id = with_conn(&pool, move |conn| create_assignee(conn, info, actor)).await?;

    Ok(IdResponse {
        success: true,
        id,
        ..Default::default()
    })
}

async fn search_assignee_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchAssigneeRequest>,
) -> anyhow::Result<SearchAssigneeResponse> {
    let info = info.into_inner();
    get_uid_from_token(info.login_token.clone(), &pool).await?;

    let found = with_conn(&pool, move |conn| find_assignees(conn, info)).await?;

    Ok(SearchAssigneeResponse {
        success: true,
        assignees: found.into_iter().map(AssigneeItem::from).collect(),
        ..Default::default()
    })
}

async fn modify_assignee_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyAssigneeRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    let actor = get_uid_from_token(info.login_token.clone(), &pool).await?;

    with_conn(&pool, move |conn| update_assignee(conn, info, actor)).await?;

    Ok(SimpleResponse::ok())
}

async fn delete_assignee_impl(
    pool: web::Data<DbPool>,
    info: web::Json<DeleteAssigneeRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    let actor = get_uid_from_token(info.login_token.clone(), &pool).await?;

    let id = info.id;
    let released = with_conn(&pool, move |conn| remove_assignee(conn, id)).await?;
    info!(
        "assignee {} deleted by {}, {} slots unassigned",
        id, actor, released
    );

    Ok(SimpleResponse::ok())
}
