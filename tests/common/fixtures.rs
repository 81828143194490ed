//! Test fixtures - reusable schemas and attribute maps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use controlla::{PersistenceGateway, RawRecord, Schema};
use serde_json::{json, Value};

pub const PROJECT_ID_PATTERN: &str = r"^\d+$";
pub const NAME_PATTERN: &str = r"^[a-zA-Z0-9 _-]+$";

/// Build a record from a `json!` object literal
pub fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Schema with `project_id` and `name` rules and a counted `label` variable
pub fn project_schema(
    gateway: Arc<dyn PersistenceGateway>,
    calls: Arc<AtomicUsize>,
) -> Arc<Schema> {
    Schema::builder("Project")
        .attributes(["project_id", "name"])
        .rule("project_id", PROJECT_ID_PATTERN)
        .rule("name", NAME_PATTERN)
        .computed("label", move |entity| {
            calls.fetch_add(1, Ordering::SeqCst);
            let name = entity.get("name").and_then(Value::as_str).unwrap_or_default();
            Ok(json!(format!("project {}", name)))
        })
        .gateway(gateway)
        .build()
        .expect("project schema builds")
}

pub fn valid_project() -> RawRecord {
    record(json!({"project_id": "12", "name": "demo"}))
}
