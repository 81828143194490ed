//! Property tests for fill, validation and serialization.

use std::collections::BTreeSet;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{json, Value};

use controlla::{Entity, InMemoryGateway, Schema};

use crate::common::*;

fn schema() -> Arc<Schema> {
    project_schema(Arc::new(InMemoryGateway::new()), Arc::new(AtomicUsize::new(0)))
}

fn valid_project_id() -> impl Strategy<Value = String> {
    "[0-9]{1,8}"
}

fn valid_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _-]{1,16}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Attributes satisfying every rule always fill and read back unchanged.
    #[test]
    fn property_valid_attributes_fill(project_id in valid_project_id(), name in valid_name()) {
        let attributes = record(json!({"project_id": project_id, "name": name}));

        let entity = Entity::new(schema(), attributes.clone()).unwrap();

        for (key, value) in &attributes {
            prop_assert_eq!(entity.get(key), Some(value));
        }
    }

    /// PROPERTY: A failed fill names exactly the fields that break their rule.
    #[test]
    fn property_failures_are_exact(
        project_id in prop_oneof![valid_project_id(), "[a-z]{1,5}"],
        name in prop_oneof![valid_name(), "[/.!]{1,3}"],
    ) {
        let mut expected = BTreeSet::new();
        if !project_id.chars().all(|c| c.is_ascii_digit()) {
            expected.insert("project_id");
        }
        if name.contains(['/', '.', '!']) {
            expected.insert("name");
        }

        let result = Entity::new(schema(), record(json!({"project_id": project_id, "name": name})));

        match result {
            Ok(_) => prop_assert!(expected.is_empty()),
            Err(err) => {
                let fields: BTreeSet<&str> = err.validation_fields().unwrap().into_iter().collect();
                prop_assert_eq!(fields, expected);
            }
        }
    }

    /// PROPERTY: The declared-attribute subset of `to_array` rebuilds an equal entity.
    #[test]
    fn property_attribute_subset_round_trips(
        project_id in valid_project_id(),
        name in valid_name(),
    ) {
        let schema = schema();
        let attributes = record(json!({"project_id": project_id, "name": name}));
        let original = Entity::new(schema.clone(), attributes).unwrap();

        let subset = original
            .to_array()
            .into_iter()
            .filter(|(k, _)| schema.is_declared(k))
            .collect();
        let rebuilt = Entity::new(schema.clone(), subset).unwrap();

        for key in schema.attribute_keys() {
            prop_assert_eq!(rebuilt.get(key), original.get(key));
        }
    }

    /// PROPERTY: `set` followed by `get` returns the written value, valid or not.
    #[test]
    fn property_set_then_get(value in "[a-z0-9]{0,8}") {
        let mut entity = Entity::new(schema(), valid_project()).unwrap();

        let accepted = entity.set("project_id", value.as_str()).is_ok();

        prop_assert_eq!(entity.get("project_id"), Some(&Value::String(value.clone())));
        let valid = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
        prop_assert_eq!(accepted, valid);
    }
}
