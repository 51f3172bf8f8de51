use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::error::ScheduleError;

pub fn assert_user(conn: &SqliteConnection, uid: i32) -> anyhow::Result<()> {
    use crate::schema::users;

    let res = users::table
        .filter(users::id.eq(uid))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res == 0 {
        bail!(ScheduleError::not_found(format!("No such user: {}", uid)));
    }

    Ok(())
}

pub fn assert_assignee(conn: &SqliteConnection, assignee_id: i32) -> anyhow::Result<()> {
    use crate::schema::assignees;

    let res = assignees::table
        .filter(assignees::id.eq(assignee_id))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res == 0 {
        bail!(ScheduleError::not_found(format!(
            "No such assignee: {}",
            assignee_id
        )));
    }

    Ok(())
}

pub fn assert_time_slot(conn: &SqliteConnection, slot_id: i32) -> anyhow::Result<()> {
    use crate::schema::time_slots;

    let res = time_slots::table
        .filter(time_slots::id.eq(slot_id))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res == 0 {
        bail!(ScheduleError::not_found(format!(
            "No such time slot: {}",
            slot_id
        )));
    }

    Ok(())
}

pub fn assert_username_free(
    conn: &SqliteConnection,
    username: &str,
    except: Option<i32>,
) -> anyhow::Result<()> {
    use crate::schema::users;

    let res = users::table
        .filter(users::username.eq(username))
        .filter(users::id.ne(except.unwrap_or(-1)))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res > 0 {
        bail!(ScheduleError::validation(format!(
            "Username {:?} is taken",
            username
        )));
    }

    Ok(())
}

pub fn assert_assignee_name_free(
    conn: &SqliteConnection,
    name: &str,
    except: Option<i32>,
) -> anyhow::Result<()> {
    use crate::schema::assignees;

    let res = assignees::table
        .filter(assignees::name.eq(name))
        .filter(assignees::id.ne(except.unwrap_or(-1)))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res > 0 {
        bail!(ScheduleError::validation(format!(
            "Assignee name {:?} is taken",
            name
        )));
    }

    Ok(())
}
