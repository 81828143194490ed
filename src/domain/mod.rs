//! Domain Layer
//!
//! Pure entity logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Attribute store, schema, entity and concrete controllers
//! - `value_objects/` - Immutable value types (RecordId, ValidationRule)
//! - `services/` - Validation engine and computed variable resolver
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Storage is only reached through the `PersistenceGateway` port
//! 2. **Immutable schemas** - Declarations are built once and shared via `Arc`
//! 3. **Ports & Adapters** - Gateways live in the infrastructure layer

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
