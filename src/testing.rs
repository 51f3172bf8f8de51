use chrono::Utc;
use diesel::prelude::*;

use crate::{
    models::{
        assignees::{NewAssignee, KIND_DJ},
        users::{NewUser, ROLE_ADMIN},
    },
    utils::hash_password,
};

pub fn add_user(conn: &SqliteConnection, username: &str) -> i32 {
    use crate::schema::users;

    diesel::insert_into(users::table)
        .values(NewUser {
            username: username.to_string(),
            display_name: None,
            password: hash_password("password"),
            role: ROLE_ADMIN.to_string(),
            is_active: true,
            created_at: Utc::now().naive_utc(),
        })
        .execute(conn)
        .unwrap();
    users::table
        .filter(users::username.eq(username))
        .select(users::id)
        .first(conn)
        .unwrap()
}

pub fn add_assignee(conn: &SqliteConnection, name: &str, is_default: bool) -> i32 {
    use crate::schema::assignees;

    let now = Utc::now().naive_utc();
    diesel::insert_into(assignees::table)
        .values(NewAssignee {
            name: name.to_string(),
            kind: KIND_DJ.to_string(),
            description: None,
            contact_name: None,
            contact_phone: None,
            contact_email: None,
            instagram: None,
            color: None,
            is_active: true,
            is_default,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        })
        .execute(conn)
        .unwrap();
    assignees::table
        .filter(assignees::name.eq(name))
        .select(assignees::id)
        .first(conn)
        .unwrap()
}

pub fn entry_count(conn: &SqliteConnection) -> i64 {
    use crate::schema::schedule_entries;

    schedule_entries::table.count().get_result(conn).unwrap()
}
