//! Domain Services
//!
//! Stateless engines the entity delegates to. No I/O.

mod resolver;
mod validator;

pub use resolver::{resolve_variables, ResolvedVariables};
pub use validator::{validate, ValidationFailure};
