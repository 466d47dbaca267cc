//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes the schema, regenerate them with `diesel print-schema` or update
//! them by hand.

diesel::table! {
    /// Registered accounts. `email` carries a unique index.
    users (id) {
        id -> Int8,
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Argon2 PHC string.
        password -> Varchar,
        admin -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Teachers leading sessions. Seeded by the initial migration.
    teachers (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    sessions (id) {
        id -> Int8,
        name -> Varchar,
        date -> Timestamptz,
        description -> Varchar,
        teacher_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Participant sets. Rows cascade away with their session or user.
    participate (session_id, user_id) {
        session_id -> Int8,
        user_id -> Int8,
        /// Join order within the session, starting at 0.
        position -> Int4,
    }
}

diesel::joinable!(sessions -> teachers (teacher_id));
diesel::joinable!(participate -> sessions (session_id));
diesel::joinable!(participate -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(participate, sessions, teachers, users);
