//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod record_id;
mod validation_rule;

pub use record_id::RecordId;
pub use validation_rule::{value_text, RulePredicate, ValidationRule};
