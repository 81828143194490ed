//! Entity lifecycle contracts: fill, computed variables, serialization.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use controlla::{Entity, EntityState, InMemoryGateway};
use serde_json::{json, Value};

use crate::common::*;

fn fresh() -> (Arc<controlla::Schema>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = project_schema(Arc::new(InMemoryGateway::new()), calls.clone());
    (schema, calls)
}

#[test]
fn contract_valid_fill_exposes_every_attribute() {
    let (schema, _) = fresh();
    let attributes = valid_project();

    let entity = Entity::new(schema, attributes.clone()).unwrap();

    for (key, value) in &attributes {
        assert_eq!(entity.get(key), Some(value), "attribute {} differs", key);
    }
    assert_eq!(entity.state(), EntityState::Validated);
}

#[test]
fn contract_to_array_is_attributes_plus_variables() {
    let (schema, _) = fresh();
    let entity = Entity::new(schema, valid_project()).unwrap();

    assert_eq!(
        Value::Object(entity.to_array()),
        json!({"project_id": "12", "name": "demo", "label": "project demo"})
    );
}

#[test]
fn contract_variables_resolve_once_per_instance() {
    let (schema, calls) = fresh();
    let mut entity = Entity::new(schema, valid_project()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    entity
        .create(record(json!({"project_id": "13", "name": "next"})))
        .unwrap();
    entity.set("name", "again").unwrap();
    entity.validate().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(entity.variable("label"), Some(&json!("project demo")));
}

#[test]
fn contract_each_instance_resolves_its_own_variables() {
    let (schema, calls) = fresh();
    let first = Entity::new(schema.clone(), valid_project()).unwrap();
    let second = Entity::new(schema, record(json!({"project_id": "1", "name": "other"}))).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(first.variable("label"), Some(&json!("project demo")));
    assert_eq!(second.variable("label"), Some(&json!("project other")));
}

#[test]
fn contract_attribute_subset_round_trips() {
    let (schema, _) = fresh();
    let original = Entity::new(schema.clone(), valid_project()).unwrap();

    let subset = original
        .to_array()
        .into_iter()
        .filter(|(k, _)| schema.is_declared(k))
        .collect();
    let rebuilt = Entity::new(schema.clone(), subset).unwrap();

    for key in schema.attribute_keys() {
        assert_eq!(rebuilt.get(key), original.get(key));
    }
}

#[test]
fn contract_to_json_encodes_to_array() {
    let (schema, _) = fresh();
    let entity = Entity::new(schema, valid_project()).unwrap();

    let decoded: Value = serde_json::from_str(&entity.to_json().unwrap()).unwrap();
    assert_eq!(decoded, Value::Object(entity.to_array()));
}

#[test]
fn contract_empty_entity_is_schema_only() {
    let (schema, calls) = fresh();
    let entity = Entity::empty(schema);

    assert_eq!(entity.state(), EntityState::Unvalidated);
    assert_eq!(entity.get("name"), Some(&Value::Null));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
