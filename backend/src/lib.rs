//! Quill: a server-rendered blog.
//!
//! Posts live in PostgreSQL behind the [`domain::ports::PostRepository`] port;
//! pages are rendered with maud and flash banners ride in the cookie session.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
