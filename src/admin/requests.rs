use serde::Deserialize;

#[derive(Deserialize, Default)]
pub struct AddUserRequest {
    pub login_token: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct SearchUserRequest {
    pub login_token: String,
    pub username: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize, Default)]
pub struct ModifyUserRequest {
    pub login_token: String,
    pub id: i32,
    pub username: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct DeleteUserRequest {
    pub login_token: String,
    pub id: i32,
}

#[derive(Deserialize, Default)]
pub struct AddAssigneeRequest {
    pub login_token: String,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub instagram: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct SearchAssigneeRequest {
    pub login_token: String,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub active_only: Option<bool>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize, Default)]
pub struct ModifyAssigneeRequest {
    pub login_token: String,
    pub id: i32,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub instagram: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct DeleteAssigneeRequest {
    pub login_token: String,
    pub id: i32,
}

#[derive(Deserialize, Default)]
pub struct AddTimeSlotRequest {
    pub login_token: String,
    pub time: Option<String>,
    pub display_order: Option<i32>,
    pub is_default: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct SearchTimeSlotRequest {
    pub login_token: String,
}

#[derive(Deserialize, Default)]
pub struct ModifyTimeSlotRequest {
    pub login_token: String,
    pub id: i32,
    pub time: Option<String>,
    pub display_order: Option<i32>,
    pub is_default: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct DeleteTimeSlotRequest {
    pub login_token: String,
    pub id: i32,
}

#[derive(Deserialize, Default)]
pub struct UpsertSlotRequest {
    pub login_token: String,
    pub date: Option<String>,
    pub bowl: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::present")]
    pub assignee_id: Option<Option<i32>>,
}

#[derive(Deserialize, Default)]
pub struct DeleteSlotRequest {
    pub login_token: String,
    pub id: i32,
}

#[derive(Deserialize, Default)]
pub struct SearchScheduleRequest {
    pub login_token: String,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub bowl: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct PopulateWeekRequest {
    pub login_token: String,
    pub bowl: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ResetRangeRequest {
    pub login_token: String,
    pub bowl: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
