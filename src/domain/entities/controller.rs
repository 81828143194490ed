//! Controller trait
//!
//! Concrete entity types wrap an [`Entity`] and get the generic contract for
//! free. `save` rebuilds the concrete type, not a bare `Entity`.

use serde_json::{Map, Value};

use super::{Entity, RawRecord};
use crate::error::ControllerResult;

pub trait Controller: Sized {
    fn from_entity(entity: Entity) -> Self;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn get(&self, key: &str) -> Option<&Value> {
        self.entity().get(key)
    }

    fn set(&mut self, key: &str, value: impl Into<Value>) -> ControllerResult<&mut Self> {
        self.entity_mut().set(key, value)?;
        Ok(self)
    }

    fn create(&mut self, attributes: RawRecord) -> ControllerResult<&mut Self> {
        self.entity_mut().create(attributes)?;
        Ok(self)
    }

    fn validate(&mut self) -> ControllerResult<&mut Self> {
        self.entity_mut().validate()?;
        Ok(self)
    }

    fn save(&self) -> ControllerResult<Self> {
        self.entity().save().map(Self::from_entity)
    }

    fn to_array(&self) -> Map<String, Value> {
        self.entity().to_array()
    }

    fn to_json(&self) -> ControllerResult<String> {
        self.entity().to_json()
    }
}
