//! Validation rule value object
//!
//! A rule constrains exactly one attribute. Values are matched through their
//! textual form:
//! - strings as-is
//! - numbers via their decimal text
//! - booleans as `"1"` / `""`
//!
//! `null`, arrays and objects have no textual form.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

/// Check used by [`ValidationRule::Predicate`]
pub type RulePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Constraint attached to one attribute key
#[derive(Clone)]
pub enum ValidationRule {
    /// Value must be present and match the pattern
    Pattern(Regex),
    /// Absent, `null` or empty values pass; anything else must match
    Optional(Regex),
    /// Named check for constraints a regular expression cannot express
    Predicate { name: String, check: RulePredicate },
}

impl ValidationRule {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(ValidationRule::Pattern)
    }

    pub fn optional(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(ValidationRule::Optional)
    }

    pub fn predicate<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        ValidationRule::Predicate {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Returns true if `value` satisfies this rule
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            ValidationRule::Pattern(re) => value_text(value).is_some_and(|t| re.is_match(&t)),
            ValidationRule::Optional(re) => match value {
                None | Some(Value::Null) => true,
                Some(v) => value_text(Some(v)).is_some_and(|t| t.is_empty() || re.is_match(&t)),
            },
            ValidationRule::Predicate { check, .. } => value_text(value).is_some_and(|t| check(&t)),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, ValidationRule::Optional(_))
    }
}

/// Textual form of an attribute value, if it has one
pub fn value_text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(true) => Some(Cow::Borrowed("1")),
        Value::Bool(false) => Some(Cow::Borrowed("")),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Pattern(re) => write!(f, "/{}/", re.as_str()),
            ValidationRule::Optional(re) => write!(f, "optional /{}/", re.as_str()),
            ValidationRule::Predicate { name, .. } => write!(f, "{}", name),
        }
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            ValidationRule::Optional(re) => f.debug_tuple("Optional").field(&re.as_str()).finish(),
            ValidationRule::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish()
            }
        }
    }
}
