//! Domain ports for the hexagonal boundary.

mod macros;
mod post_repository;

pub(crate) use macros::define_port_error;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{FixturePostRepository, PostRepository, PostRepositoryError};
