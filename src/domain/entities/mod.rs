//! Domain Entities
//!
//! - `AttributeStore` - keyed values mirroring a record's columns
//! - `Schema` - per-type declaration of attributes, rules and variables
//! - `Entity` - the generic validated wrapper around one record
//! - `Controller` - typed concrete entities built on `Entity`
//! - `Deployment` - deployment record controller

mod attribute_store;
mod controller;
mod deployment;
mod entity;
mod schema;

pub use attribute_store::{AttributeStore, RawRecord};
pub use controller::Controller;
pub use deployment::{branch_matches, Deployment};
pub use entity::{Entity, EntityState};
pub use schema::{Computation, Schema, SchemaBuilder, VariableDecl};
