use serde::Serialize;

use crate::{
    admin::responses::TimeSlotItem,
    models::assignees::AssigneeData,
    schedule::{defaults::DefaultSlot, queries::ListedEntry},
};

#[derive(Default, Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub entries: Vec<ListedEntry>,
}

#[derive(Default, Serialize)]
pub struct PublicAssigneeItem {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub color: Option<String>,
    pub is_default: bool,
}

impl From<AssigneeData> for PublicAssigneeItem {
    fn from(data: AssigneeData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            kind: data.kind,
            color: data.color,
            is_default: data.is_default,
        }
    }
}

#[derive(Default, Serialize)]
pub struct AssigneesResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub assignees: Vec<PublicAssigneeItem>,
}

#[derive(Default, Serialize)]
pub struct TimeSlotsResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub time_slots: Vec<TimeSlotItem>,
}

#[derive(Default, Serialize)]
pub struct DefaultSlotsResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub slots: Vec<DefaultSlot>,
}

crate::impl_err_response! {
    ScheduleResponse,
    AssigneesResponse,
    TimeSlotsResponse,
    DefaultSlotsResponse,
}
