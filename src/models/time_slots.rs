use crate::schema::time_slots;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct TimeSlotData {
    pub id: i32,
    pub time: String,
    pub display_order: i32,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "time_slots"]
pub struct NewTimeSlot {
    pub time: String,
    pub display_order: i32,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[table_name = "time_slots"]
pub struct UpdateTimeSlot {
    pub time: Option<String>,
    pub display_order: Option<i32>,
    pub is_default: Option<bool>,
    pub updated_at: NaiveDateTime,
}

/// Start times offered to the schedule editor on a fresh database.
pub const STANDARD_START_TIMES: [&str; 11] = [
    "12:00", "14:00", "16:00", "17:00", "18:00", "20:00", "20:30", "22:00", "22:30", "00:00",
    "00:30",
];
