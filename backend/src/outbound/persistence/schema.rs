//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Blog posts.
    ///
    /// `id` is assigned by the database (`gen_random_uuid()`); `created_at`
    /// fixes the listing order.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Optional post title.
        title -> Nullable<Text>,
        /// Optional post body.
        content -> Nullable<Text>,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}
