//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod persistence_gateway;

pub use persistence_gateway::{GatewayError, PersistenceGateway};
