//! Session-backed flash messages.
//!
//! A flash is a short banner queued by one request and shown by the next
//! rendered page. The queue lives in the cookie session under a single key;
//! [`FlashContext::push`] appends to it and [`FlashContext::drain_all`] reads
//! and clears it in one step, so every message is shown exactly once.

use std::collections::BTreeMap;

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash";

/// Banner category; decides how a message is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashCategory {
    /// Confirms a completed action.
    Success,
    /// Reports a failed action.
    Error,
}

impl FlashCategory {
    /// Label used in markup and session storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Queued messages grouped by category, each group in push order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashMessages(BTreeMap<FlashCategory, Vec<String>>);

impl FlashMessages {
    /// Append a message under `category`.
    pub fn push(&mut self, category: FlashCategory, message: impl Into<String>) {
        self.0.entry(category).or_default().push(message.into());
    }

    /// Whether no message is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Iterate categories and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (FlashCategory, &[String])> {
        self.0
            .iter()
            .map(|(category, messages)| (*category, messages.as_slice()))
    }
}

/// Per-request handle on the session's flash queue.
///
/// Handlers take it as an extractor; `push` and `drain_all` are the only
/// operations that touch the queue.
#[derive(Clone)]
pub struct FlashContext(Session);

impl FlashContext {
    /// Wrap the underlying Actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue `message` for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the session cannot store the queue.
    pub fn push(&self, category: FlashCategory, message: impl Into<String>) -> Result<(), Error> {
        let mut queue = self.stored();
        queue.push(category, message);
        self.0
            .insert(FLASH_KEY, queue)
            .map_err(|error| Error::internal(format!("failed to persist flash message: {error}")))
    }

    /// Take every queued message, leaving the queue empty.
    ///
    /// Undecodable session data counts as an empty queue and is discarded.
    #[must_use]
    pub fn drain_all(&self) -> FlashMessages {
        match self.0.remove_as::<FlashMessages>(FLASH_KEY) {
            Some(Ok(queue)) => queue,
            Some(Err(raw)) => {
                warn!(raw = %raw, "discarding undecodable flash queue");
                FlashMessages::default()
            }
            None => FlashMessages::default(),
        }
    }

    fn stored(&self) -> FlashMessages {
        match self.0.get::<FlashMessages>(FLASH_KEY) {
            Ok(queue) => queue.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "replacing undecodable flash queue");
                FlashMessages::default()
            }
        }
    }
}

impl FromRequest for FlashContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
