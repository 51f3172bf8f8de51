use crate::schema::schedule_entries;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Queryable, Identifiable, Serialize, Clone, Debug, PartialEq)]
#[table_name = "schedule_entries"]
pub struct ScheduleEntry {
    pub id: i32,
    pub date: NaiveDate,
    pub bowl: String,
    pub start_time: String,
    pub end_time: String,
    pub assignee_id: Option<i32>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "schedule_entries"]
pub struct NewScheduleEntry<'a> {
    pub date: NaiveDate,
    pub bowl: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub assignee_id: Option<i32>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
