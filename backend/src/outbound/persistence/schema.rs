//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Blog posts. `id` is assigned by a `BIGSERIAL` sequence.
    post (id) {
        id -> Int8,
        title -> Text,
        body -> Text,
        author -> Int8,
    }
}
