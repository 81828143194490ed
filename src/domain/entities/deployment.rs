//! Deployment controller
//!
//! A deployment ties a project branch to a hook and an optional target
//! server. The resolved `server` variable carries the server record looked
//! up through a second gateway.

use std::sync::Arc;

use serde_json::Value;

use super::{Controller, Entity, RawRecord, Schema};
use crate::domain::ports::PersistenceGateway;
use crate::domain::value_objects::RecordId;
use crate::error::ControllerResult;

/// Branch flags, in the order they may follow the branch name
const BRANCH_FLAGS: [&str; 4] = ["-ex", "-d", "-b", "-f"];

#[derive(Debug, Clone)]
pub struct Deployment(Entity);

impl Deployment {
    pub const NAME: &'static str = "Deployment";

    pub const ATTRIBUTES: [&'static str; 8] = [
        "project_id",
        "name",
        "created_by",
        "path",
        "branch",
        "hook",
        "server_id",
        "auto_deploy",
    ];

    /// Schema persisting through `deployments` and resolving `server`
    /// through `servers`
    pub fn schema(
        deployments: Arc<dyn PersistenceGateway>,
        servers: Arc<dyn PersistenceGateway>,
    ) -> ControllerResult<Arc<Schema>> {
        Schema::builder(Self::NAME)
            .attributes(Self::ATTRIBUTES)
            .rule("project_id", r"^\d+$")
            .rule("name", r"^[a-zA-Z0-9\s_-]+$")
            .rule("created_by", r"^\d+$")
            .rule("path", r"^[a-zA-Z0-9\s_-]+$")
            .predicate_rule(
                "branch",
                "branch name with ordered -ex/-d/-b/-f flags",
                branch_matches,
            )
            .rule("hook", r"^[a-zA-Z0-9-]+$")
            .optional_rule("server_id", r"^\d+|$")
            .rule("auto_deploy", r"^\d+$")
            .computed("server", move |entity| lookup_server(servers.as_ref(), entity))
            .gateway(deployments)
            .build()
    }

    pub fn new(schema: Arc<Schema>, attributes: RawRecord) -> ControllerResult<Self> {
        Entity::new(schema, attributes).map(Self)
    }

    pub fn instance(schema: &Arc<Schema>, id: RecordId) -> ControllerResult<Self> {
        Entity::instance(schema, id).map(Self)
    }

    pub fn server_id(&self) -> Option<RecordId> {
        self.0.get("server_id").and_then(RecordId::from_value)
    }

    /// Resolved server record, `null` when the deployment has no server
    pub fn server(&self) -> Option<&Value> {
        self.0.variable("server")
    }

    pub fn branch(&self) -> Option<&str> {
        self.0.get("branch").and_then(Value::as_str)
    }

    pub fn auto_deploy(&self) -> bool {
        match self.0.get("auto_deploy") {
            Some(Value::Number(n)) => n.as_u64().is_some_and(|n| n != 0),
            Some(Value::String(s)) => s.parse::<u64>().is_ok_and(|n| n != 0),
            _ => false,
        }
    }
}

impl Controller for Deployment {
    fn from_entity(entity: Entity) -> Self {
        Self(entity)
    }

    fn entity(&self) -> &Entity {
        &self.0
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.0
    }
}

/// Server record for `server_id`, `null` when the value is not a record id
fn lookup_server(servers: &dyn PersistenceGateway, entity: &Entity) -> ControllerResult<Value> {
    match entity.get("server_id").and_then(RecordId::from_value) {
        Some(id) => Ok(Value::Object(servers.find_by_id(id)?)),
        None => Ok(Value::Null),
    }
}

/// Check a deployment branch name.
///
/// Accepted shape: an optional name without dashes, then any of the flags
/// `-ex`, `-d`, `-b`, `-f` in that order, each at most once, then an
/// optional `-suffix`. The suffix may not itself start with a flag, so
/// repeated or out-of-order flags are rejected.
pub fn branch_matches(branch: &str) -> bool {
    let rest = match branch.find('-') {
        Some(i) => &branch[i..],
        None => return true,
    };
    flags_then_suffix(rest, 0)
}

fn flags_then_suffix(rest: &str, next_flag: usize) -> bool {
    let stops_here = !BRANCH_FLAGS.iter().any(|f| rest.starts_with(f))
        && (rest.is_empty() || rest.starts_with('-'));
    if stops_here {
        return true;
    }

    BRANCH_FLAGS[next_flag..]
        .iter()
        .enumerate()
        .any(|(offset, flag)| {
            rest.strip_prefix(flag)
                .is_some_and(|tail| flags_then_suffix(tail, next_flag + offset + 1))
        })
}
