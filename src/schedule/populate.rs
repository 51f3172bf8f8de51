use anyhow::Context;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use log::{info, warn};
use serde::Serialize;

use super::{defaults::default_slots, reconcile::find_slot, Bowl};
use crate::{
    error::ScheduleError,
    models::{assignees::AssigneeData, schedule_entries::NewScheduleEntry},
    utils::date_range,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PopulateReport {
    pub created: u32,
    pub skipped: u32,
    pub bowl: Bowl,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The assignee flagged as default. With several flagged, the lowest id wins.
pub fn default_assignee(conn: &SqliteConnection) -> anyhow::Result<Option<AssigneeData>> {
    use crate::schema::assignees;

    let mut defaults = assignees::table
        .filter(assignees::is_default.eq(true))
        .order(assignees::id.asc())
        .get_results::<AssigneeData>(conn)
        .context("DB error")?;
    if defaults.len() > 1 {
        warn!(
            "{} assignees are flagged default, using {:?}",
            defaults.len(),
            defaults[0].name
        );
    }
    Ok(if defaults.is_empty() {
        None
    } else {
        Some(defaults.swap_remove(0))
    })
}

pub fn populate_week(
    conn: &SqliteConnection,
    bowl: Bowl,
    start_date: NaiveDate,
    end_date: NaiveDate,
    actor: i32,
) -> anyhow::Result<PopulateReport> {
    use crate::schema::schedule_entries;

    let dates = date_range(start_date, end_date)?;

    let report = conn.transaction::<_, anyhow::Error, _>(|| {
        let assignee = match default_assignee(conn)? {
            Some(assignee) => assignee,
            None => {
                return Err(ScheduleError::Configuration(
                    "No default assignee configured".to_string(),
                )
                .into())
            }
        };

        let mut report = PopulateReport {
            created: 0,
            skipped: 0,
            bowl,
            start_date,
            end_date,
        };
        let now = Utc::now().naive_utc();

        for date in dates {
            for slot in default_slots(date, bowl) {
                if find_slot(conn, date, bowl, slot.start_time)?.is_some() {
                    report.skipped += 1;
                    continue;
                }

                diesel::insert_into(schedule_entries::table)
                    .values(NewScheduleEntry {
                        date,
                        bowl: bowl.as_str(),
                        start_time: slot.start_time,
                        end_time: slot.end_time,
                        assignee_id: Some(assignee.id),
                        created_by: Some(actor),
                        updated_by: Some(actor),
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)
                    .with_context(|| format!("Failed to create {} {} {}", date, bowl, slot.start_time))?;
                report.created += 1;
            }
        }

        Ok(report)
    })?;

    info!(
        "Populated {} bowl {}..={} for user {}: {} created, {} skipped",
        bowl, start_date, end_date, actor, report.created, report.skipped
    );
    Ok(report)
}
