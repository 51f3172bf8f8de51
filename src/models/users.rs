use crate::schema::users;
use chrono::NaiveDateTime;

#[derive(Queryable, Identifiable, Clone, Debug)]
#[table_name = "users"]
pub struct UserData {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub password: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl UserData {
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
    pub display_name: Option<String>,
    pub password: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "users"]
pub struct UpdateUser {
    pub username: Option<String>,
    pub display_name: Option<Option<String>>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.display_name.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}

pub const ROLE_ADMIN: &str = "admin";
