use anyhow::Context;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;

use super::Bowl;
use crate::{
    models::schedule_entries::ScheduleEntry,
    utils::{format_time_str, session_order},
};

#[derive(Clone, Debug, Default)]
pub struct EntryFilter {
    pub date: Option<NaiveDate>,
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub bowl: Option<Bowl>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListedEntry {
    pub id: i32,
    pub date: NaiveDate,
    pub bowl: String,
    pub start_time: String,
    pub end_time: String,
    pub assignee_id: Option<i32>,
    pub assignee_name: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<(ScheduleEntry, Option<String>)> for ListedEntry {
    fn from((entry, assignee_name): (ScheduleEntry, Option<String>)) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            bowl: entry.bowl,
            start_time: entry.start_time,
            end_time: entry.end_time,
            assignee_id: entry.assignee_id,
            assignee_name,
            created_by: entry.created_by,
            updated_by: entry.updated_by,
            created_at: format_time_str(&entry.created_at),
            updated_at: format_time_str(&entry.updated_at),
        }
    }
}

/// Entries with their assignee's name, ordered by date, bowl and session
/// order of the start time.
pub fn list_entries(conn: &SqliteConnection, filter: &EntryFilter) -> anyhow::Result<Vec<ListedEntry>> {
    use crate::schema::{assignees, schedule_entries};

    let mut query = schedule_entries::table
        .left_join(assignees::table)
        .select((schedule_entries::all_columns, assignees::name.nullable()))
        .into_boxed();
    if let Some(date) = filter.date {
        query = query.filter(schedule_entries::date.eq(date));
    } else if let Some((start, end)) = filter.range {
        query = query.filter(schedule_entries::date.between(start, end));
    }
    if let Some(bowl) = filter.bowl {
        query = query.filter(schedule_entries::bowl.eq(bowl.as_str()));
    }

    let rows = query
        .order((schedule_entries::date.asc(), schedule_entries::start_time.asc()))
        .load::<(ScheduleEntry, Option<String>)>(conn)
        .context("DB error")?;

    let mut entries: Vec<ListedEntry> = rows.into_iter().map(ListedEntry::from).collect();
    entries.sort_by(|a, b| {
        (a.date, &a.bowl, session_order(&a.start_time))
            .cmp(&(b.date, &b.bowl, session_order(&b.start_time)))
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_conn;
    use crate::schedule::reconcile::{upsert_slot, SlotUpsert};
    use crate::testing::{add_assignee, add_user};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn put(conn: &SqliteConnection, date: NaiveDate, bowl: Bowl, start: &str, assignee: Option<i32>) {
        let actor = 1;
        let slot = SlotUpsert {
            date,
            bowl,
            start_time: start.to_string(),
            end_time: "02:30".to_string(),
            assignee_id: Some(assignee),
        };
        upsert_slot(conn, &slot, actor).unwrap();
    }

    #[test]
    fn lists_in_session_order_with_names() {
        let conn = memory_conn();
        add_user(&conn, "alice");
        let dj = add_assignee(&conn, "DJ Kool", false);
        let day = ymd(2025, 12, 3);
        put(&conn, day, Bowl::Lower, "00:00", None);
        put(&conn, day, Bowl::Lower, "22:00", Some(dj));
        put(&conn, day, Bowl::Lower, "17:00", None);
        put(&conn, day, Bowl::Upper, "18:00", None);
        put(&conn, ymd(2025, 12, 4), Bowl::Lower, "17:00", None);

        let filter = EntryFilter {
            date: Some(day),
            bowl: Some(Bowl::Lower),
            ..Default::default()
        };
        let entries = list_entries(&conn, &filter).unwrap();
        let starts: Vec<&str> = entries.iter().map(|e| e.start_time.as_str()).collect();
        assert_eq!(starts, ["17:00", "22:00", "00:00"]);
        assert_eq!(entries[1].assignee_name.as_deref(), Some("DJ Kool"));
        assert_eq!(entries[0].assignee_name, None);
    }

    #[test]
    fn range_filter_is_inclusive_and_spans_bowls() {
        let conn = memory_conn();
        add_user(&conn, "alice");
        put(&conn, ymd(2025, 12, 1), Bowl::Lower, "17:00", None);
        put(&conn, ymd(2025, 12, 7), Bowl::Upper, "14:00", None);
        put(&conn, ymd(2025, 12, 8), Bowl::Upper, "14:00", None);

        let filter = EntryFilter {
            range: Some((ymd(2025, 12, 1), ymd(2025, 12, 7))),
            ..Default::default()
        };
        assert_eq!(list_entries(&conn, &filter).unwrap().len(), 2);
    }
}
