use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use log::debug;

use super::Bowl;
use crate::{
    database::assert,
    error::ScheduleError,
    models::schedule_entries::{NewScheduleEntry, ScheduleEntry},
    utils::{parse_date_str, parse_slot_time, require},
};

/// A validated slot assignment, ready to be written.
///
/// `assignee_id` is `None` when the caller did not mention it: an existing
/// slot keeps its assignee. `Some(None)` clears it.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotUpsert {
    pub date: NaiveDate,
    pub bowl: Bowl,
    pub start_time: String,
    pub end_time: String,
    pub assignee_id: Option<Option<i32>>,
}

impl SlotUpsert {
    pub fn parse(
        date: Option<String>,
        bowl: Option<String>,
        start_time: Option<String>,
        end_time: Option<String>,
        assignee_id: Option<Option<i32>>,
    ) -> anyhow::Result<Self> {
        let date = require(date, "date")?;
        let bowl = require(bowl, "bowl")?;
        let start_time = require(start_time, "start_time")?;
        let end_time = require(end_time, "end_time")?;

        Ok(Self {
            date: parse_date_str(date, "date")?,
            bowl: bowl.parse()?,
            start_time: parse_slot_time(start_time, "start_time")?,
            end_time: parse_slot_time(end_time, "end_time")?,
            assignee_id,
        })
    }
}

pub fn find_slot(
    conn: &SqliteConnection,
    date: NaiveDate,
    bowl: Bowl,
    start_time: &str,
) -> anyhow::Result<Option<ScheduleEntry>> {
    use crate::schema::schedule_entries;

    schedule_entries::table
        .filter(schedule_entries::date.eq(date))
        .filter(schedule_entries::bowl.eq(bowl.as_str()))
        .filter(schedule_entries::start_time.eq(start_time))
        .first::<ScheduleEntry>(conn)
        .optional()
        .context("DB error")
}

fn update_slot(
    conn: &SqliteConnection,
    existing: &ScheduleEntry,
    slot: &SlotUpsert,
    actor: i32,
) -> anyhow::Result<()> {
    use crate::schema::schedule_entries;

    let target = schedule_entries::table.filter(schedule_entries::id.eq(existing.id));
    let stamp = (
        schedule_entries::end_time.eq(&slot.end_time),
        schedule_entries::updated_by.eq(Some(actor)),
        schedule_entries::updated_at.eq(Utc::now().naive_utc()),
    );
    match slot.assignee_id {
        Some(assignee_id) => diesel::update(target)
            .set((stamp, schedule_entries::assignee_id.eq(assignee_id)))
            .execute(conn),
        None => diesel::update(target).set(stamp).execute(conn),
    }
    .context("DB error")?;
    Ok(())
}

/// Creates the slot, or updates end time and (when given) assignee of the
/// slot already holding the same natural key. `created_by`/`created_at` of an existing
/// slot are never rewritten.
pub fn upsert_slot(
    conn: &SqliteConnection,
    slot: &SlotUpsert,
    actor: i32,
) -> anyhow::Result<ScheduleEntry> {
    use crate::schema::schedule_entries;

    if let Some(Some(assignee_id)) = slot.assignee_id {
        assert::assert_assignee(conn, assignee_id)?;
    }

    conn.transaction::<_, anyhow::Error, _>(|| {
        match find_slot(conn, slot.date, slot.bowl, &slot.start_time)? {
            Some(existing) => {
                debug!("Updating slot {} ({} {} {})", existing.id, slot.date, slot.bowl, slot.start_time);
                update_slot(conn, &existing, slot, actor)?;
            }
            None => {
                let now = Utc::now().naive_utc();
                let data = NewScheduleEntry {
                    date: slot.date,
                    bowl: slot.bowl.as_str(),
                    start_time: &slot.start_time,
                    end_time: &slot.end_time,
                    assignee_id: slot.assignee_id.flatten(),
                    created_by: Some(actor),
                    updated_by: Some(actor),
                    created_at: now,
                    updated_at: now,
                };
                match diesel::insert_into(schedule_entries::table)
                    .values(&data)
                    .execute(conn)
                {
                    Ok(_) => {}
                    // Another writer claimed the key since the lookup; fall back to updating it.
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                        if let Some(existing) =
                            find_slot(conn, slot.date, slot.bowl, &slot.start_time)?
                        {
                            update_slot(conn, &existing, slot, actor)?;
                        }
                    }
                    Err(err) => return Err(err).context("DB error"),
                }
            }
        }

        match find_slot(conn, slot.date, slot.bowl, &slot.start_time)? {
            Some(entry) => Ok(entry),
            None => bail!("Slot {} {} {} vanished after write", slot.date, slot.bowl, slot.start_time),
        }
    })
}

pub fn delete_slot(conn: &SqliteConnection, entry_id: i32) -> anyhow::Result<()> {
    use crate::schema::schedule_entries;

    let deleted = diesel::delete(schedule_entries::table.filter(schedule_entries::id.eq(entry_id)))
        .execute(conn)
        .context("DB error")?;
    if deleted == 0 {
        bail!(ScheduleError::not_found("Schedule entry not found"));
    }
    Ok(())
}
