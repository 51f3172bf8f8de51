table! {
    assignees (id) {
        id -> Integer,
        name -> Text,
        kind -> Text,
        description -> Nullable<Text>,
        contact_name -> Nullable<Text>,
        contact_phone -> Nullable<Text>,
        contact_email -> Nullable<Text>,
        instagram -> Nullable<Text>,
        color -> Nullable<Text>,
        is_active -> Bool,
        is_default -> Bool,
        created_by -> Nullable<Integer>,
        updated_by -> Nullable<Integer>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    schedule_entries (id) {
        id -> Integer,
        date -> Date,
        bowl -> Text,
        start_time -> Text,
        end_time -> Text,
        assignee_id -> Nullable<Integer>,
        created_by -> Nullable<Integer>,
        updated_by -> Nullable<Integer>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    time_slots (id) {
        id -> Integer,
        time -> Text,
        display_order -> Integer,
        is_default -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    user_logins (token, uid, login_time) {
        token -> Text,
        uid -> Integer,
        login_time -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Integer,
        username -> Text,
        display_name -> Nullable<Text>,
        password -> Text,
        role -> Text,
        is_active -> Bool,
        created_at -> Timestamp,
    }
}

joinable!(schedule_entries -> assignees (assignee_id));
joinable!(user_logins -> users (uid));

allow_tables_to_appear_in_same_query!(
    assignees,
    schedule_entries,
    time_slots,
    user_logins,
    users,
);
