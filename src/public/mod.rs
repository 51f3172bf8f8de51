mod responses;

use actix_web::{get, web, HttpResponse, Responder};
use anyhow::Context;
use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use self::responses::*;
use crate::{
    admin::{responses::TimeSlotItem, time_slots::list_time_slots},
    database::with_conn,
    error::{error_kind, error_status},
    models::assignees::AssigneeData,
    schedule::{
        defaults::{slots_for, DefaultSlot},
        queries::{list_entries, EntryFilter},
        Bowl,
    },
    utils::{date_range, non_blank, parse_date_str, require},
    DbPool,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(schedule)
        .service(assignees)
        .service(time_slots)
        .service(default_slots);
}

#[derive(Deserialize)]
pub struct ScheduleQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub bowl: Option<String>,
}

fn reply<T: Serialize>(
    route: &str,
    result: anyhow::Result<T>,
    on_err: impl FnOnce(&anyhow::Error) -> T,
) -> HttpResponse {
    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            warn!("{} failed ({}): {:#}", route, error_kind(&err), err);
            HttpResponse::build(error_status(&err)).json(on_err(&err))
        }
    }
}

#[derive(Deserialize)]
pub struct DefaultSlotsQuery {
    pub date: Option<String>,
    pub bowl: Option<String>,
}

/// The grid week population would lay down for one date. An unknown bowl
/// has no grid.
pub fn default_slot_preview(query: DefaultSlotsQuery) -> anyhow::Result<Vec<DefaultSlot>> {
    let date = parse_date_str(require(query.date, "date")?, "date")?;
    let bowl = query.bowl.unwrap_or_default();
    Ok(slots_for(date, &bowl).to_vec())
}

pub fn schedule_filter(query: ScheduleQuery) -> anyhow::Result<EntryFilter> {
    let start_date = parse_date_str(require(query.start_date, "start_date")?, "start_date")?;
    let end_date = parse_date_str(require(query.end_date, "end_date")?, "end_date")?;
    date_range(start_date, end_date)?;
    let bowl = match non_blank(query.bowl) {
        Some(bowl) => Some(bowl.parse::<Bowl>()?),
        None => None,
    };
    Ok(EntryFilter {
        range: Some((start_date, end_date)),
        bowl,
        ..Default::default()
    })
}

pub fn active_assignees(conn: &SqliteConnection) -> anyhow::Result<Vec<AssigneeData>> {
    use crate::schema::assignees;

    assignees::table
        .filter(assignees::is_active.eq(true))
        .order(assignees::name.asc())
        .get_results::<AssigneeData>(conn)
        .context("DB error")
}

async fn schedule_impl(
    pool: web::Data<DbPool>,
    query: ScheduleQuery,
) -> anyhow::Result<ScheduleResponse> {
    let filter = schedule_filter(query)?;
    let entries = with_conn(&pool, move |conn| list_entries(conn, &filter)).await?;

    Ok(ScheduleResponse {
        success: true,
        entries,
        ..Default::default()
    })
}

#[get("/schedule")]
async fn schedule(pool: web::Data<DbPool>, query: web::Query<ScheduleQuery>) -> impl Responder {
    let result = schedule_impl(pool, query.into_inner()).await;
    reply("/schedule", result, ScheduleResponse::err)
}

#[get("/assignees")]
async fn assignees(pool: web::Data<DbPool>) -> impl Responder {
    let result = with_conn(&pool, active_assignees)
        .await
        .map(|found| AssigneesResponse {
            success: true,
            assignees: found.into_iter().map(PublicAssigneeItem::from).collect(),
            ..Default::default()
        });
    reply("/assignees", result, AssigneesResponse::err)
}

#[get("/time_slots")]
async fn time_slots(pool: web::Data<DbPool>) -> impl Responder {
    let result = with_conn(&pool, list_time_slots)
        .await
        .map(|slots| TimeSlotsResponse {
            success: true,
            time_slots: slots.into_iter().map(TimeSlotItem::from).collect(),
            ..Default::default()
        });
    reply("/time_slots", result, TimeSlotsResponse::err)
}

#[get("/default_slots")]
async fn default_slots(query: web::Query<DefaultSlotsQuery>) -> impl Responder {
    let result = default_slot_preview(query.into_inner()).map(|slots| DefaultSlotsResponse {
        success: true,
        slots,
        ..Default::default()
    });
    reply("/default_slots", result, DefaultSlotsResponse::err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::memory_conn,
        testing::add_assignee,
    };

    fn query(start: Option<&str>, end: Option<&str>, bowl: Option<&str>) -> ScheduleQuery {
        ScheduleQuery {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            bowl: bowl.map(str::to_string),
        }
    }

    #[test]
    fn schedule_needs_a_range() {
        let filter = schedule_filter(query(Some("2025-12-01"), Some("2025-12-07"), None)).unwrap();
        assert!(filter.range.is_some());
        assert_eq!(filter.bowl, None);

        let err = schedule_filter(query(Some("2025-12-01"), None, None)).unwrap_err();
        assert_eq!(error_kind(&err), "validation");
        let err = schedule_filter(query(Some("2025-12-01"), Some("2025-12-07"), Some("roof")))
            .unwrap_err();
        assert_eq!(error_kind(&err), "validation");
    }

    #[test]
    fn default_slot_preview_follows_the_weekday() {
        let preview = |date: Option<&str>, bowl: &str| {
            default_slot_preview(DefaultSlotsQuery {
                date: date.map(str::to_string),
                bowl: Some(bowl.to_string()),
            })
        };

        // 2025-12-07 is a Sunday.
        let slots = preview(Some("2025-12-07"), "upper").unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start_time, "14:00");
        assert!(preview(Some("2025-12-07"), "garden").unwrap().is_empty());

        let err = preview(None, "upper").unwrap_err();
        assert_eq!(error_kind(&err), "validation");
    }

    #[test]
    fn inactive_assignees_are_hidden() {
        use crate::schema::assignees;

        let conn = memory_conn();
        add_assignee(&conn, "Zed", false);
        let gone = add_assignee(&conn, "Old Timer", false);
        add_assignee(&conn, "Alpha", true);
        diesel::update(assignees::table.filter(assignees::id.eq(gone)))
            .set(assignees::is_active.eq(false))
            .execute(&conn)
            .unwrap();

        let names: Vec<String> = active_assignees(&conn)
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["Alpha", "Zed"]);
    }
}
