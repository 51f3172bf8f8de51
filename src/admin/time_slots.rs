use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::{dsl::max, prelude::*};

use super::{requests::*, responses::*};
use crate::{
    auth::utils::get_uid_from_token,
    database::{assert, with_conn},
    error::ScheduleError,
    models::time_slots::{NewTimeSlot, TimeSlotData, UpdateTimeSlot},
    protocol::SimpleResponse,
    utils::{parse_slot_time, require},
    DbPool,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_time_slot)
        .service(search_time_slot)
        .service(modify_time_slot)
        .service(delete_time_slot);
}

crate::post_funcs! {
    (add_time_slot, "/add_time_slot", AddTimeSlotRequest, IdResponse),
    (search_time_slot, "/search_time_slot", SearchTimeSlotRequest, SearchTimeSlotResponse),
    (modify_time_slot, "/modify_time_slot", ModifyTimeSlotRequest, SimpleResponse),
    (delete_time_slot, "/delete_time_slot", DeleteTimeSlotRequest, SimpleResponse),
}

fn assert_time_free(conn: &SqliteConnection, time: &str, except: Option<i32>) -> anyhow::Result<()> {
    use crate::schema::time_slots;

    let res = time_slots::table
        .filter(time_slots::time.eq(time))
        .filter(time_slots::id.ne(except.unwrap_or(-1)))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;
    if res > 0 {
        bail!(ScheduleError::validation(format!(
            "Time slot {} already exists",
            time
        )));
    }
    Ok(())
}

/// Time slots in the order the schedule editor offers them.
pub fn list_time_slots(conn: &SqliteConnection) -> anyhow::Result<Vec<TimeSlotData>> {
    use crate::schema::time_slots;

    time_slots::table
        .order((time_slots::display_order.asc(), time_slots::time.asc()))
        .get_results::<TimeSlotData>(conn)
        .context("DB error")
}

pub fn create_time_slot(conn: &SqliteConnection, info: AddTimeSlotRequest) -> anyhow::Result<i32> {
    use crate::schema::time_slots;

    let time = parse_slot_time(require(info.time, "time")?, "time")?;
    let display_order = info.display_order;
    let is_default = info.is_default.unwrap_or(false);

    conn.transaction::<_, anyhow::Error, _>(|| {
        assert_time_free(conn, &time, None)?;

        // Unordered additions go to the end of the list.
        let display_order = match display_order {
            Some(order) => order,
            None => {
                let last = time_slots::table
                    .select(max(time_slots::display_order))
                    .first::<Option<i32>>(conn)
                    .context("DB error")?;
                last.unwrap_or(0) + 1
            }
        };

        let now = Utc::now().naive_utc();
        diesel::insert_into(time_slots::table)
            .values(NewTimeSlot {
                time: time.clone(),
                display_order,
                is_default,
                created_at: now,
                updated_at: now,
            })
            .execute(conn)
            .context("DB error")?;

        time_slots::table
            .filter(time_slots::time.eq(&time))
            .select(time_slots::id)
            .first(conn)
            .context("DB error")
    })
}

pub fn update_time_slot(conn: &SqliteConnection, info: ModifyTimeSlotRequest) -> anyhow::Result<()> {
    use crate::schema::time_slots;

    let id = info.id;
    let time = match info.time {
        Some(time) => Some(parse_slot_time(time.trim(), "time")?),
        None => None,
    };
    let data = UpdateTimeSlot {
        time,
        display_order: info.display_order,
        is_default: info.is_default,
        updated_at: Utc::now().naive_utc(),
    };

    conn.transaction::<_, anyhow::Error, _>(|| {
        assert::assert_time_slot(conn, id)?;
        if let Some(time) = &data.time {
            assert_time_free(conn, time, Some(id))?;
        }

        diesel::update(time_slots::table.filter(time_slots::id.eq(id)))
            .set(&data)
            .execute(conn)
            .context("DB error")?;
        Ok(())
    })
}

pub fn remove_time_slot(conn: &SqliteConnection, id: i32) -> anyhow::Result<()> {
    use crate::schema::time_slots;

    let deleted = diesel::delete(time_slots::table.filter(time_slots::id.eq(id)))
        .execute(conn)
        .context("DB error")?;
    if deleted == 0 {
        bail!(ScheduleError::not_found("Time slot not found"));
    }
    Ok(())
}

async fn add_time_slot_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddTimeSlotRequest>,
) -> anyhow::Result<IdResponse> {
    let info = info.into_inner();
    get_uid_from_token(info.login_token.clone(), &pool).await?;

    let id = with_conn(&pool, move |conn| create_time_slot(conn, info)).await?;

    Ok(IdResponse {
        success: true,
        id,
        ..Default::default()
    })
}

async fn search_time_slot_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchTimeSlotRequest>,
) -> anyhow::Result<SearchTimeSlotResponse> {
    let info = info.into_inner();
    get_uid_from_token(info.login_token, &pool).await?;

    let slots = with_conn(&pool, list_time_slots).await?;

    Ok(SearchTimeSlotResponse {
        success: true,
        time_slots: slots.into_iter().map(TimeSlotItem::from).collect(),
        ..Default::default()
    })
}

async fn modify_time_slot_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyTimeSlotRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    get_uid_from_token(info.login_token.clone(), &pool).await?;

    with_conn(&pool, move |conn| update_time_slot(conn, info)).await?;

    Ok(SimpleResponse::ok())
}

async fn delete_time_slot_impl(
    pool: web::Data<DbPool>,
    info: web::Json<DeleteTimeSlotRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    get_uid_from_token(info.login_token, &pool).await?;

    let id = info.id;
    with_conn(&pool, move |conn| remove_time_slot(conn, id)).await?;

    Ok(SimpleResponse::ok())
}
