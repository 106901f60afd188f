//! Port abstraction for post persistence adapters and their errors.
//!
//! Handlers depend on [`PostRepository`] only, so the Diesel adapter can be
//! swapped for [`FixturePostRepository`] in tests or local runs.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// The store could not be reached.
        Connection {
            /// Driver or pool description of the failure.
            message: String,
        } => "post repository connection failed: {message}",
        /// The store rejected a query or mutation.
        Query {
            /// Driver description of the failure.
            message: String,
        } => "post repository query failed: {message}",
    }
}

/// Port for reading and creating posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its store-assigned identifier.
    async fn create(&self, draft: &PostDraft) -> Result<Post, PostRepositoryError>;

    /// Return every stored post in store order.
    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Fetch a post by identifier; `Ok(None)` when no such post exists.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError>;
}

/// In-memory repository that keeps posts in insertion order.
///
/// Can be flipped offline to simulate an unreachable store.
///
/// # Examples
/// ```
/// use quill::domain::PostDraft;
/// use quill::domain::ports::{FixturePostRepository, PostRepository};
///
/// # tokio_test_block(async {
/// let repo = FixturePostRepository::default();
/// let post = repo.create(&PostDraft::new(Some("Hello"), Some("World"))).await.expect("create");
/// let found = repo.find_by_id(&post.id()).await.expect("lookup");
/// assert_eq!(found, Some(post));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct FixturePostRepository {
    posts: Mutex<Vec<Post>>,
    offline: AtomicBool,
}

impl FixturePostRepository {
    /// Create a repository that fails every call as if the store were down.
    #[must_use]
    pub fn unavailable() -> Self {
        let repo = Self::default();
        repo.set_offline(true);
        repo
    }

    /// Toggle simulated store outage.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    fn ensure_online(&self) -> Result<(), PostRepositoryError> {
        if self.offline.load(Ordering::Acquire) {
            Err(PostRepositoryError::connection("fixture store offline"))
        } else {
            Ok(())
        }
    }

    fn with_posts<T>(&self, f: impl FnOnce(&mut Vec<Post>) -> T) -> Result<T, PostRepositoryError> {
        self.ensure_online()?;
        let mut posts = self
            .posts
            .lock()
            .map_err(|_| PostRepositoryError::query("fixture store lock poisoned"))?;
        Ok(f(&mut posts))
    }
}

#[async_trait]
impl PostRepository for FixturePostRepository {
    async fn create(&self, draft: &PostDraft) -> Result<Post, PostRepositoryError> {
        self.with_posts(|posts| {
            let post = Post::from_draft(PostId::random(), draft.clone());
            posts.push(post.clone());
            post
        })
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        self.with_posts(|posts| posts.clone())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        self.with_posts(|posts| posts.iter().find(|post| post.id() == *id).cloned())
    }
}
