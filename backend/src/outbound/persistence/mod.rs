//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Implements the domain's [`PostRepository`](crate::domain::ports::PostRepository)
//! port on top of `diesel-async` with `bb8` pooling.
//!
//! - Row structs (`models.rs`) and the table definition (`schema.rs`) are
//!   internal; only domain types cross this boundary.
//! - Every Diesel or pool failure maps onto
//!   [`PostRepositoryError`](crate::domain::ports::PostRepositoryError).
//!
//! # Example
//!
//! ```ignore
//! use quill::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::connect_lazy(&PoolConfig::new("postgres://localhost/blog"));
//! let repo = DieselPostRepository::new(pool);
//! ```

mod diesel_post_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
