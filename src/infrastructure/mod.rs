//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `repositories/` - Persistence gateway implementations (in-memory, JSON file)

pub mod repositories;

// Re-export for convenience
pub use repositories::{InMemoryGateway, JsonFileGateway};
