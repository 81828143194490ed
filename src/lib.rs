//! Controlla - schema-validated entity controllers
//!
//! A concrete entity type declares its attributes, validation rules and
//! computed variables once in a [`Schema`]. The generic [`Entity`] supplies
//! fill, validate, get/set, save and serialization on top of it, and
//! delegates storage to a [`PersistenceGateway`].

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use config::{Config, LogFormat, LoggingConfig, StoreConfig};
pub use domain::entities::{
    AttributeStore, Controller, Deployment, Entity, EntityState, RawRecord, Schema, SchemaBuilder,
    VariableDecl,
};
pub use domain::ports::{GatewayError, PersistenceGateway};
pub use domain::services::ValidationFailure;
pub use domain::value_objects::{RecordId, ValidationRule};
pub use error::{ControllerError, ControllerResult};
pub use infrastructure::{InMemoryGateway, JsonFileGateway};
