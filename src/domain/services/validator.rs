//! Validation engine
//!
//! Evaluates every rule once against an attribute store and reports all
//! failing fields together.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::AttributeStore;
use crate::domain::value_objects::ValidationRule;

/// Every field that failed its rule, with the rule it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    entity: String,
    failures: BTreeMap<String, String>,
}

impl ValidationFailure {
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Failing field names, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.failures.keys().map(String::as_str)
    }

    /// Description of the rule `field` failed
    pub fn rule_for(&self, field: &str) -> Option<&str> {
        self.failures.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.failures.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed validation: ", self.entity)?;
        for (i, (field, rule)) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} must be type of {}", field, rule)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Check `store` against `rules`.
///
/// A missing value counts as a failure for any rule that does not accept
/// absence on its own.
pub fn validate<'a, I>(
    entity: &str,
    store: &AttributeStore,
    rules: I,
) -> Result<(), ValidationFailure>
where
    I: IntoIterator<Item = (&'a str, &'a ValidationRule)>,
{
    let failures: BTreeMap<String, String> = rules
        .into_iter()
        .filter(|(key, rule)| !rule.matches(store.get(key)))
        .map(|(key, rule)| (key.to_string(), rule.to_string()))
        .collect();

    if failures.is_empty() {
        return Ok(());
    }

    tracing::debug!(
        entity,
        fields = ?failures.keys().collect::<Vec<_>>(),
        "validation failed"
    );
    Err(ValidationFailure {
        entity: entity.to_string(),
        failures,
    })
}
