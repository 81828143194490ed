//! Entity schema
//!
//! The per-type declaration shared by every instance of a concrete entity:
//! attribute keys, validation rules, computed variables and the gateway the
//! type persists through. Built once and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::Entity;
use crate::domain::ports::PersistenceGateway;
use crate::domain::value_objects::ValidationRule;
use crate::error::{ControllerError, ControllerResult};

/// Deferred computation bound to the entity it is resolved for
pub type Computation = Arc<dyn Fn(&Entity) -> ControllerResult<Value> + Send + Sync>;

/// Declared value of a computed variable
#[derive(Clone)]
pub enum VariableDecl {
    Literal(Value),
    Computed(Computation),
}

impl fmt::Debug for VariableDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableDecl::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            VariableDecl::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

pub struct Schema {
    name: String,
    attributes: Vec<String>,
    rules: BTreeMap<String, ValidationRule>,
    variables: Vec<(String, VariableDecl)>,
    gateway: Option<Arc<dyn PersistenceGateway>>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Entity type name used in errors and logs
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    pub fn is_declared(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a == key)
    }

    pub fn rule(&self, key: &str) -> Option<&ValidationRule> {
        self.rules.get(key)
    }

    /// Rules the validation engine evaluates: those on declared keys
    pub fn active_rules(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.rules
            .iter()
            .filter(|(key, _)| self.is_declared(key))
            .map(|(key, rule)| (key.as_str(), rule))
    }

    /// Rule keys that name no declared attribute; such rules are inert
    pub fn undeclared_rule_keys(&self) -> Vec<&str> {
        self.rules
            .keys()
            .filter(|key| !self.is_declared(key))
            .map(String::as_str)
            .collect()
    }

    pub fn variables(&self) -> &[(String, VariableDecl)] {
        &self.variables
    }

    pub fn has_gateway(&self) -> bool {
        self.gateway.is_some()
    }

    /// The declared gateway, or a configuration error if there is none
    pub fn gateway(&self) -> ControllerResult<&dyn PersistenceGateway> {
        self.gateway.as_deref().ok_or_else(|| {
            ControllerError::configuration(&self.name, "no persistence gateway declared")
        })
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("rules", &self.rules)
            .field("variables", &self.variables)
            .field("gateway", &self.gateway.is_some())
            .finish()
    }
}

/// Declaration surface for a concrete entity type
pub struct SchemaBuilder {
    name: String,
    attributes: Vec<String>,
    rules: BTreeMap<String, ValidationRule>,
    variables: Vec<(String, VariableDecl)>,
    gateway: Option<Arc<dyn PersistenceGateway>>,
    invalid_patterns: Vec<String>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            rules: BTreeMap::new(),
            variables: Vec::new(),
            gateway: None,
            invalid_patterns: Vec::new(),
        }
    }

    pub fn attribute(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.attributes.contains(&key) {
            self.attributes.push(key);
        }
        self
    }

    pub fn attributes<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().fold(self, |b, key| b.attribute(key))
    }

    pub fn validation(mut self, key: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.insert(key.into(), rule);
        self
    }

    /// Require `key` to be present and match `pattern`
    pub fn rule(self, key: impl Into<String>, pattern: &str) -> Self {
        let key = key.into();
        match ValidationRule::pattern(pattern) {
            Ok(rule) => self.validation(key, rule),
            Err(e) => self.invalid(key, e),
        }
    }

    /// Accept `key` when absent or empty, otherwise require `pattern`
    pub fn optional_rule(self, key: impl Into<String>, pattern: &str) -> Self {
        let key = key.into();
        match ValidationRule::optional(pattern) {
            Ok(rule) => self.validation(key, rule),
            Err(e) => self.invalid(key, e),
        }
    }

    pub fn predicate_rule<F>(self, key: impl Into<String>, name: &str, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validation(key, ValidationRule::predicate(name, check))
    }

    pub fn literal(self, name: impl Into<String>, value: Value) -> Self {
        self.variable(name.into(), VariableDecl::Literal(value))
    }

    pub fn computed<F>(self, name: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&Entity) -> ControllerResult<Value> + Send + Sync + 'static,
    {
        self.variable(name.into(), VariableDecl::Computed(Arc::new(compute)))
    }

    pub fn gateway(mut self, gateway: Arc<dyn PersistenceGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn build(self) -> ControllerResult<Arc<Schema>> {
        if !self.invalid_patterns.is_empty() {
            return Err(ControllerError::configuration(
                &self.name,
                format!("invalid rule pattern: {}", self.invalid_patterns.join("; ")),
            ));
        }

        let schema = Schema {
            name: self.name,
            attributes: self.attributes,
            rules: self.rules,
            variables: self.variables,
            gateway: self.gateway,
        };

        let undeclared = schema.undeclared_rule_keys();
        if !undeclared.is_empty() {
            tracing::warn!(
                entity = %schema.name,
                keys = ?undeclared,
                "rules on undeclared attributes are ignored"
            );
        }

        Ok(Arc::new(schema))
    }

    fn variable(mut self, name: String, decl: VariableDecl) -> Self {
        match self.variables.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = decl,
            None => self.variables.push((name, decl)),
        }
        self
    }

    fn invalid(mut self, key: String, err: regex::Error) -> Self {
        self.invalid_patterns.push(format!("{}: {}", key, err));
        self
    }
}
