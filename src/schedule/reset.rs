use anyhow::Context;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::warn;

use super::Bowl;
use crate::error::ScheduleError;

/// Deletes every slot of `bowl` dated within `[start_date, end_date]`.
/// There is no soft delete: the rows are gone once this returns.
pub fn reset_range(
    conn: &SqliteConnection,
    bowl: Bowl,
    start_date: NaiveDate,
    end_date: NaiveDate,
    actor: i32,
) -> anyhow::Result<usize> {
    use crate::schema::schedule_entries;

    if end_date < start_date {
        return Err(ScheduleError::validation(format!(
            "end_date {} is before start_date {}",
            end_date, start_date
        ))
        .into());
    }

    let deleted = diesel::delete(
        schedule_entries::table
            .filter(schedule_entries::bowl.eq(bowl.as_str()))
            .filter(schedule_entries::date.between(start_date, end_date)),
    )
    .execute(conn)
    .context("DB error")?;

    warn!(
        "User {} reset {} bowl {}..={}: {} entries deleted",
        actor, bowl, start_date, end_date, deleted
    );
    Ok(deleted)
}
