//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users known from the identity provider, keyed by their external id.
    users (id) {
        id -> Int8,
        /// At most 255 characters.
        username -> Varchar,
    }
}

diesel::table! {
    schedules (id) {
        id -> Int8,
        schedule_name -> Varchar,
        memo -> Text,
        created_by -> Int8,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    candidates (id) {
        id -> Int8,
        candidate_name -> Varchar,
        schedule_id -> Int8,
    }
}

diesel::table! {
    /// One row per (candidate, user); `availability` is 0, 1 or 2.
    availabilities (candidate_id, user_id) {
        candidate_id -> Int8,
        user_id -> Int8,
        schedule_id -> Int8,
        availability -> Int2,
    }
}

diesel::table! {
    comments (schedule_id, user_id) {
        schedule_id -> Int8,
        user_id -> Int8,
        comment -> Varchar,
    }
}

diesel::joinable!(schedules -> users (created_by));
diesel::joinable!(candidates -> schedules (schedule_id));
diesel::joinable!(availabilities -> candidates (candidate_id));
diesel::joinable!(comments -> schedules (schedule_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    schedules,
    candidates,
    availabilities,
    comments,
);
