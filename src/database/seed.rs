use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;
use log::info;

use crate::{
    models::{
        assignees::{NewAssignee, FALLBACK_NAME, KIND_EVENT},
        time_slots::{NewTimeSlot, STANDARD_START_TIMES},
        users::{NewUser, ROLE_ADMIN},
    },
    utils::hash_password,
};

/// Fills an empty database with what the schedule tools need to work:
/// a default assignee, the standard start times and one administrator.
/// Tables that already hold data are left alone.
pub fn seed(conn: &SqliteConnection, admin_username: &str, admin_password: &str) -> anyhow::Result<()> {
    use crate::schema::{assignees, time_slots, users};

    conn.transaction::<_, anyhow::Error, _>(|| {
        let now = Utc::now().naive_utc();

        let defaults = assignees::table
            .filter(assignees::is_default.eq(true))
            .count()
            .get_result::<i64>(conn)
            .context("DB error")?;
        if defaults == 0 {
            let existing = assignees::table
                .filter(assignees::name.eq(FALLBACK_NAME))
                .select(assignees::id)
                .first::<i32>(conn)
                .optional()
                .context("DB error")?;
            match existing {
                Some(id) => {
                    diesel::update(assignees::table.filter(assignees::id.eq(id)))
                        .set(assignees::is_default.eq(true))
                        .execute(conn)
                        .context("DB error")?;
                }
                None => {
                    diesel::insert_into(assignees::table)
                        .values(NewAssignee {
                            name: FALLBACK_NAME.to_string(),
                            kind: KIND_EVENT.to_string(),
                            description: None,
                            contact_name: None,
                            contact_phone: None,
                            contact_email: None,
                            instagram: None,
                            color: None,
                            is_active: true,
                            is_default: true,
                            created_by: None,
                            updated_by: None,
                            created_at: now,
                            updated_at: now,
                        })
                        .execute(conn)
                        .context("DB error")?;
                }
            }
            info!("Seeded default assignee {:?}", FALLBACK_NAME);
        }

        let slots = time_slots::table
            .count()
            .get_result::<i64>(conn)
            .context("DB error")?;
        if slots == 0 {
            for (order, time) in STANDARD_START_TIMES.iter().enumerate() {
                diesel::insert_into(time_slots::table)
                    .values(NewTimeSlot {
                        time: time.to_string(),
                        display_order: order as i32 + 1,
                        is_default: false,
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)
                    .context("DB error")?;
            }
            info!("Seeded {} time slots", STANDARD_START_TIMES.len());
        }

        let user_count = users::table
            .count()
            .get_result::<i64>(conn)
            .context("DB error")?;
        if user_count == 0 {
            diesel::insert_into(users::table)
                .values(NewUser {
                    username: admin_username.to_string(),
                    display_name: None,
                    password: hash_password(admin_password),
                    role: ROLE_ADMIN.to_string(),
                    is_active: true,
                    created_at: now,
                })
                .execute(conn)
                .context("DB error")?;
            info!("Created admin user {:?}", admin_username);
        }

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_conn;
    use crate::models::assignees::AssigneeData;

    #[test]
    fn seed_fills_empty_database_once() {
        use crate::schema::{assignees, time_slots, users};

        let conn = memory_conn();
        seed(&conn, "admin", "secret").unwrap();
        seed(&conn, "admin", "secret").unwrap();

        let defaults = assignees::table
            .filter(assignees::is_default.eq(true))
            .get_results::<AssigneeData>(&conn)
            .unwrap();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, FALLBACK_NAME);

        let slots = time_slots::table.count().get_result::<i64>(&conn).unwrap();
        assert_eq!(slots, STANDARD_START_TIMES.len() as i64);

        let password = users::table
            .filter(users::username.eq("admin"))
            .select(users::password)
            .first::<String>(&conn)
            .unwrap();
        assert_eq!(password, hash_password("secret"));
    }
}
