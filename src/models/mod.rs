pub mod assignees;
pub mod schedule_entries;
pub mod time_slots;
pub mod user_logins;
pub mod users;
