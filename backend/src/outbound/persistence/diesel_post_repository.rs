//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Post, PostDraft, PostId};

use super::models::{NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the [`PostRepository`] port.
///
/// Listing order is insertion order (`created_at`, then `id` to break ties).
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    match error {
        PoolError::Checkout { message } => PostRepositoryError::connection(message),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PostRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => PostRepositoryError::query("database query error"),
        _ => PostRepositoryError::query("database error"),
    }
}

fn row_to_post(row: PostRow) -> Post {
    Post::new(PostId::from_uuid(row.id), row.title, row.content)
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, draft: &PostDraft) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPostRow {
            title: draft.title.as_deref(),
            content: draft.content.as_deref(),
        };

        diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_post)
            .map_err(map_diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .order((posts::created_at.asc(), posts::id.asc()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_post).collect())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = posts::table
            .filter(posts::id.eq(id.as_uuid()))
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, PostRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound, PostRepositoryError::query("database error"))]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection closed".to_owned()),
        ),
        PostRepositoryError::connection("database connection error")
    )]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ),
        PostRepositoryError::query("database error")
    )]
    fn diesel_errors_are_classified(
        #[case] error: DieselError,
        #[case] expected: PostRepositoryError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn rows_keep_nullable_fields() {
        let id = Uuid::new_v4();
        let post = row_to_post(PostRow {
            id,
            title: None,
            content: Some(String::new()),
        });
        assert_eq!(post.id().as_uuid(), &id);
        assert_eq!(post.title(), None);
        assert_eq!(post.content(), Some(""));
    }
}
