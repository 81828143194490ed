//! Entity
//!
//! A schema-validated wrapper around one persisted record. The entity owns
//! its attribute store, shares its type's [`Schema`], and delegates
//! persistence to the schema's gateway.
//!
//! Writes are applied before validation runs: when `fill`, `create` or `set`
//! fail validation the new values stay in the store and the entity drops
//! back to [`EntityState::Unvalidated`].

use std::sync::Arc;

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::{AttributeStore, RawRecord, Schema};
use crate::domain::services::{resolve_variables, validate, ResolvedVariables};
use crate::domain::value_objects::RecordId;
use crate::error::{ControllerError, ControllerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityState {
    /// Constructed empty, or modified without passing validation
    #[default]
    Unvalidated,
    /// Last validation succeeded
    Validated,
}

#[derive(Clone)]
pub struct Entity {
    schema: Arc<Schema>,
    store: AttributeStore,
    variables: ResolvedVariables,
    state: EntityState,
}

impl Entity {
    /// Schema-only entity with every declared attribute set to `null`
    pub fn empty(schema: Arc<Schema>) -> Self {
        let store = AttributeStore::with_keys(schema.attribute_keys());
        Self {
            schema,
            store,
            variables: ResolvedVariables::new(),
            state: EntityState::Unvalidated,
        }
    }

    /// Build an entity from `attributes`, resolving variables and validating.
    ///
    /// An empty map yields the same schema-only entity as [`Entity::empty`].
    /// Otherwise the schema must declare a persistence gateway.
    pub fn new(schema: Arc<Schema>, attributes: RawRecord) -> ControllerResult<Self> {
        if attributes.is_empty() {
            return Ok(Self::empty(schema));
        }
        if !schema.has_gateway() {
            return Err(ControllerError::configuration(
                schema.name(),
                "declare a persistence gateway before supplying attributes",
            ));
        }

        let mut entity = Self::empty(schema);
        entity.fill(attributes)?;
        Ok(entity)
    }

    /// Load the record stored under `id`
    pub fn instance(schema: &Arc<Schema>, id: RecordId) -> ControllerResult<Self> {
        let record = schema.gateway()?.find_by_id(id)?;
        tracing::debug!(entity = schema.name(), %id, "loaded record");
        Self::new(Arc::clone(schema), record)
    }

    /// Merge `attributes`, resolve outstanding variables, then validate
    pub fn fill(&mut self, attributes: RawRecord) -> ControllerResult<&mut Self> {
        self.store.merge(attributes);
        self.state = EntityState::Unvalidated;

        let fresh = resolve_variables(self.schema.variables(), &self.variables, self)?;
        if !fresh.is_empty() {
            tracing::debug!(
                entity = self.schema.name(),
                variables = ?fresh.keys().collect::<Vec<_>>(),
                "resolved variables"
            );
        }
        self.variables.extend(fresh);

        self.validate()
    }

    /// Merge `attributes` and validate without touching variables
    pub fn create(&mut self, attributes: RawRecord) -> ControllerResult<&mut Self> {
        self.store.merge(attributes);
        self.state = EntityState::Unvalidated;
        self.validate()
    }

    /// Re-run every rule against the current attributes
    pub fn validate(&mut self) -> ControllerResult<&mut Self> {
        match validate(self.schema.name(), &self.store, self.schema.active_rules()) {
            Ok(()) => {
                self.state = EntityState::Validated;
                Ok(self)
            }
            Err(failure) => {
                self.state = EntityState::Unvalidated;
                Err(failure.into())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.store.get(key)
    }

    /// Write one attribute, then validate the whole entity
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> ControllerResult<&mut Self> {
        self.store.set(key, value.into());
        self.state = EntityState::Unvalidated;
        self.validate()
    }

    /// Persist the current attributes and return the entity the gateway
    /// hands back. `self` is left untouched.
    pub fn save(&self) -> ControllerResult<Entity> {
        let record = self.schema.gateway()?.upsert(self.store.as_map())?;
        tracing::debug!(
            entity = self.schema.name(),
            id = ?record.get(RecordId::KEY),
            "saved record"
        );
        Entity::new(Arc::clone(&self.schema), record)
    }

    /// Identifier assigned by the gateway, if the entity has one
    pub fn id(&self) -> Option<RecordId> {
        self.store.get(RecordId::KEY).and_then(RecordId::from_value)
    }

    /// Attributes merged with resolved variables; attributes win on collision
    pub fn properties(&self) -> Map<String, Value> {
        let mut properties = self.variables.clone();
        properties.extend(self.store.iter().map(|(k, v)| (k.to_string(), v.clone())));
        properties
    }

    pub fn to_array(&self) -> Map<String, Value> {
        self.properties()
    }

    pub fn to_json(&self) -> ControllerResult<String> {
        Ok(serde_json::to_string(&self.properties())?)
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Forget a resolved variable so the next `fill` resolves it again
    pub fn unresolve(&mut self, name: &str) -> bool {
        self.variables.remove(name).is_some()
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.store
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn is_validated(&self) -> bool {
        self.state == EntityState::Validated
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut AttributeStore {
        &mut self.store
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("schema", &self.schema.name())
            .field("attributes", self.store.as_map())
            .field("variables", &self.variables)
            .field("state", &self.state)
            .finish()
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.properties())
    }
}
