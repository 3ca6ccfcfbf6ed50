pub mod actor_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod movie_repo;
pub mod seed;
pub mod store;

pub use store::{CastingStore, PgStore};
