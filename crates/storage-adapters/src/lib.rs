//! # storage-adapters
//!
//! Implementations of the repository ports.
//!
//! - [`memory::MemoryStore`]: always compiled, backs tests and throwaway runs.
//! - `sqlite::SqliteStore`: the relational store, behind the `db-sqlite` feature.

pub mod memory;

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;

#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteStore;
