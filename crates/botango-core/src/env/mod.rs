//! Environment file generation
//!
//! The resolved selection decides which blocks land in the project's
//! `.env`; the store merges them without clobbering existing values.

pub mod block;
pub mod store;

pub use block::EnvBlock;
pub use store::{EnvFile, EnvStore, EnvStoreConfig};
