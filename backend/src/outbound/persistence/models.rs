//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::post;

/// Row struct for reading from the post table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author: i64,
}

/// Insertable struct for creating new post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post)]
pub(crate) struct NewPostRow<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub author: i64,
}
