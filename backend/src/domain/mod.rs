//! Domain primitives and ports.
//!
//! Public surface:
//! - [`Post`], [`PostId`], [`PostDraft`]: the only entity the blog stores.
//! - [`Error`], [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.
//! - [`ports`]: the hexagonal boundary towards the post store.

pub mod error;
pub mod ports;
pub mod post;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::post::{Post, PostDraft, PostId, PostValidationError};
pub use self::trace_id::TraceId;

/// HTTP header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
