//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed post storage using Diesel ORM.
//!
//! Adapters only translate between domain types and store representations.

pub mod persistence;
