use actix_web::{post, web, HttpResponse, Responder};
use chrono::NaiveDate;
use log::info;

use super::{requests::*, responses::*};
use crate::{
    auth::utils::get_uid_from_token,
    database::with_conn,
    protocol::SimpleResponse,
    schedule::{
        populate::populate_week,
        queries::{list_entries, EntryFilter},
        reconcile::{delete_slot, upsert_slot, SlotUpsert},
        reset::reset_range,
        Bowl,
    },
    utils::{date_range, non_blank, parse_date_str, require},
    DbPool,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(upsert_slot_route)
        .service(delete_slot_route)
        .service(search_schedule)
        .service(populate_week_route)
        .service(reset_range_route);
}

crate::post_funcs! {
    (upsert_slot_route, "/upsert_slot", UpsertSlotRequest, UpsertSlotResponse),
    (delete_slot_route, "/delete_slot", DeleteSlotRequest, SimpleResponse),
    (search_schedule, "/search_schedule", SearchScheduleRequest, SearchScheduleResponse),
    (populate_week_route, "/populate_week", PopulateWeekRequest, PopulateWeekResponse),
    (reset_range_route, "/reset_range", ResetRangeRequest, ResetRangeResponse),
}

/// Bowl and both range ends, all required. Ordering and span are checked by
/// the operation itself.
fn parse_bowl_range(
    bowl: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
) -> anyhow::Result<(Bowl, NaiveDate, NaiveDate)> {
    let bowl: Bowl = require(bowl, "bowl")?.parse()?;
    let start_date = parse_date_str(require(start_date, "start_date")?, "start_date")?;
    let end_date = parse_date_str(require(end_date, "end_date")?, "end_date")?;
    Ok((bowl, start_date, end_date))
}

/// A single `date`, or a `start_date`/`end_date` pair; `bowl` is optional.
pub fn parse_schedule_filter(
    date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    bowl: Option<String>,
) -> anyhow::Result<EntryFilter> {
    let bowl = match non_blank(bowl) {
        Some(bowl) => Some(bowl.parse::<Bowl>()?),
        None => None,
    };
    if let Some(date) = non_blank(date) {
        return Ok(EntryFilter {
            date: Some(parse_date_str(date, "date")?),
            bowl,
            ..Default::default()
        });
    }

    let start_date = parse_date_str(require(start_date, "start_date")?, "start_date")?;
    let end_date = parse_date_str(require(end_date, "end_date")?, "end_date")?;
    date_range(start_date, end_date)?;
    Ok(EntryFilter {
        range: Some((start_date, end_date)),
        bowl,
        ..Default::default()
    })
}

async fn upsert_slot_route_impl(
    pool: web::Data<DbPool>,
    info: web::Json<UpsertSlotRequest>,
) -> anyhow::Result<UpsertSlotResponse> {
    let info = info.into_inner();
    let slot = SlotUpsert::parse(
        info.date,
        info.bowl,
        info.start_time,
        info.end_time,
        info.assignee_id,
    )?;
    let actor = get_uid_from_token(info.login_token, &pool).await?;

    let entry = with_conn(&pool, move |conn| upsert_slot(conn, &slot, actor)).await?;

    Ok(UpsertSlotResponse {
        success: true,
        entry: Some(entry),
        ..Default::default()
    })
}

async fn delete_slot_route_impl(
    pool: web::Data<DbPool>,
    info: web::Json<DeleteSlotRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    let actor = get_uid_from_token(info.login_token, &pool).await?;

    let id = info.id;
    with_conn(&pool, move |conn| delete_slot(conn, id)).await?;
    info!("schedule entry {} deleted by {}", id, actor);

    Ok(SimpleResponse::ok())
}

async fn search_schedule_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchScheduleRequest>,
) -> anyhow::Result<SearchScheduleResponse> {
    let info = info.into_inner();
    let filter = parse_schedule_filter(info.date, info.start_date, info.end_date, info.bowl)?;
    get_uid_from_token(info.login_token, &pool).await?;

    let entries = with_conn(&pool, move |conn| list_entries(conn, &filter)).await?;

    Ok(SearchScheduleResponse {
        success: true,
        entries,
        ..Default::default()
    })
}

async fn populate_week_route_impl(
    pool: web::Data<DbPool>,
    info: web::Json<PopulateWeekRequest>,
) -> anyhow::Result<PopulateWeekResponse> {
    let info = info.into_inner();
    let (bowl, start_date, end_date) =
        parse_bowl_range(info.bowl, info.start_date, info.end_date)?;
    let actor = get_uid_from_token(info.login_token, &pool).await?;

    let report = with_conn(&pool, move |conn| {
        populate_week(conn, bowl, start_date, end_date, actor)
    })
    .await?;

    Ok(PopulateWeekResponse {
        success: true,
        created: report.created,
        skipped: report.skipped,
        bowl: report.bowl.to_string(),
        start_date: report.start_date.to_string(),
        end_date: report.end_date.to_string(),
        ..Default::default()
    })
}

async fn reset_range_route_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ResetRangeRequest>,
) -> anyhow::Result<ResetRangeResponse> {
    let info = info.into_inner();
    let (bowl, start_date, end_date) =
        parse_bowl_range(info.bowl, info.start_date, info.end_date)?;
    let actor = get_uid_from_token(info.login_token, &pool).await?;

    let deleted = with_conn(&pool, move |conn| {
        reset_range(conn, bowl, start_date, end_date, actor)
    })
    .await?;

    Ok(ResetRangeResponse {
        success: true,
        deleted,
        ..Default::default()
    })
}
