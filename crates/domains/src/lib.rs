//! The central domain models and port definitions for the admin panel.

pub mod errors;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
