//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on the
//! domain port and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::PostRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Post store used by every page that reads or writes posts.
    pub posts: Arc<dyn PostRepository>,
}

impl HttpState {
    /// Construct state around a post repository.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use quill::domain::ports::FixturePostRepository;
    /// use quill::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixturePostRepository::default()));
    /// let _posts = state.posts.clone();
    /// ```
    #[must_use]
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
