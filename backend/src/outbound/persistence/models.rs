//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; the repository converts
//! them into domain [`Post`](crate::domain::Post) values.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::posts;

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Insertable struct for creating post records. `id` and `created_at` are
/// filled in by column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}
