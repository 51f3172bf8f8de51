use serde::Serialize;

use crate::{
    auth::responses::UserItem,
    models::{assignees::AssigneeData, schedule_entries::ScheduleEntry, time_slots::TimeSlotData},
    schedule::queries::ListedEntry,
    utils::format_time_str,
};

#[derive(Default, Serialize)]
pub struct IdResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub id: i32,
}

#[derive(Default, Serialize)]
pub struct SearchUserResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub users: Vec<UserItem>,
}

#[derive(Default, Serialize)]
pub struct AssigneeItem {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub instagram: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub is_default: bool,
    pub updated_by: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AssigneeData> for AssigneeItem {
    fn from(data: AssigneeData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            kind: data.kind,
            description: data.description,
            contact_name: data.contact_name,
            contact_phone: data.contact_phone,
            contact_email: data.contact_email,
            instagram: data.instagram,
            color: data.color,
            is_active: data.is_active,
            is_default: data.is_default,
            updated_by: data.updated_by,
            created_at: format_time_str(&data.created_at),
            updated_at: format_time_str(&data.updated_at),
        }
    }
}

#[derive(Default, Serialize)]
pub struct SearchAssigneeResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub assignees: Vec<AssigneeItem>,
}

#[derive(Default, Serialize)]
pub struct TimeSlotItem {
    pub id: i32,
    pub time: String,
    pub display_order: i32,
    pub is_default: bool,
}

impl From<TimeSlotData> for TimeSlotItem {
    fn from(data: TimeSlotData) -> Self {
        Self {
            id: data.id,
            time: data.time,
            display_order: data.display_order,
            is_default: data.is_default,
        }
    }
}

#[derive(Default, Serialize)]
pub struct SearchTimeSlotResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub time_slots: Vec<TimeSlotItem>,
}

#[derive(Default, Serialize)]
pub struct UpsertSlotResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub entry: Option<ScheduleEntry>,
}

#[derive(Default, Serialize)]
pub struct SearchScheduleResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub entries: Vec<ListedEntry>,
}

#[derive(Default, Serialize)]
pub struct PopulateWeekResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub created: u32,
    pub skipped: u32,
    pub bowl: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Default, Serialize)]
pub struct ResetRangeResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub deleted: usize,
}

crate::impl_err_response! {
    IdResponse,
    SearchUserResponse,
    SearchAssigneeResponse,
    SearchTimeSlotResponse,
    UpsertSlotResponse,
    SearchScheduleResponse,
    PopulateWeekResponse,
    ResetRangeResponse,
}
