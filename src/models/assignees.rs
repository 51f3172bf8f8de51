use crate::schema::assignees;
use chrono::NaiveDateTime;

#[derive(Queryable, Identifiable, Clone, Debug)]
#[table_name = "assignees"]
pub struct AssigneeData {
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
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "assignees"]
pub struct NewAssignee {
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
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// `None` leaves a column untouched; `Some(None)` clears a nullable one.
#[derive(AsChangeset)]
#[table_name = "assignees"]
pub struct UpdateAssignee {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<Option<String>>,
    pub contact_name: Option<Option<String>>,
    pub contact_phone: Option<Option<String>>,
    pub contact_email: Option<Option<String>>,
    pub instagram: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
    pub updated_by: Option<i32>,
    pub updated_at: NaiveDateTime,
}

pub const KIND_DJ: &str = "dj";
pub const KIND_EVENT: &str = "event";
pub const KINDS: [&str; 2] = [KIND_DJ, KIND_EVENT];

/// Name printed for slots with no assignee when no default is configured.
pub const FALLBACK_NAME: &str = "TBA";
