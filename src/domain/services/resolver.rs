//! Computed variable resolver
//!
//! Turns variable declarations into concrete values. A variable is resolved
//! at most once per entity: names already present in `resolved` are skipped.

use serde_json::{Map, Value};

use crate::domain::entities::{Entity, VariableDecl};
use crate::error::ControllerResult;

/// Resolved computed variables by name
pub type ResolvedVariables = Map<String, Value>;

/// Resolve every declaration not yet in `resolved`, returning only the new
/// values. Computations see `entity` as it is at the time of the call.
pub fn resolve_variables(
    declarations: &[(String, VariableDecl)],
    resolved: &ResolvedVariables,
    entity: &Entity,
) -> ControllerResult<ResolvedVariables> {
    let mut fresh = ResolvedVariables::new();

    for (name, decl) in declarations {
        if resolved.contains_key(name) {
            continue;
        }
        let value = match decl {
            VariableDecl::Literal(value) => value.clone(),
            VariableDecl::Computed(compute) => compute(entity)?,
        };
        fresh.insert(name.clone(), value);
    }

    Ok(fresh)
}
