use serde::Serialize;

use crate::{models::users::UserData, utils::format_time_str};

#[derive(Default, Serialize)]
pub struct UserItem {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<UserData> for UserItem {
    fn from(data: UserData) -> Self {
        Self {
            display_name: data.shown_name().to_string(),
            id: data.id,
            username: data.username,
            role: data.role,
            is_active: data.is_active,
            created_at: format_time_str(&data.created_at),
        }
    }
}

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub login_token: String,
    pub user: UserItem,
}

#[derive(Default, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub err: String,
    pub kind: String,
    pub logged_in: bool,
    pub user: Option<UserItem>,
}

crate::impl_err_response! {
    LoginResponse,
    SessionResponse,
}
