//! Deployment template model
//!
//! The emission target: a deterministic JSON document mapping logical ids to
//! resource declarations, plus named outputs. Maps are `BTreeMap` so repeated
//! synthesis serializes byte-identically.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{GantryError, GantryResult};

/// A single resource declaration in the template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    /// Platform resource type, e.g. `orchestrator/task-definition`
    #[serde(rename = "type")]
    pub kind: String,
    /// Type-specific properties
    pub properties: Value,
}

impl Resource {
    pub fn new(kind: impl Into<String>, properties: Value) -> Self {
        Self {
            kind: kind.into(),
            properties,
        }
    }
}

/// A synthesized deployment template
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Template {
    resources: BTreeMap<String, Resource>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, String>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under a logical id
    pub fn add_resource(&mut self, id: impl Into<String>, resource: Resource) -> GantryResult<()> {
        let id = id.into();
        if self.resources.contains_key(&id) {
            return Err(GantryError::DuplicateLogicalId { id });
        }
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Register a named output value
    pub fn add_output(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.outputs.insert(name.into(), value.into());
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    pub fn outputs(&self) -> &BTreeMap<String, String> {
        &self.outputs
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// The full template as a JSON value
    pub fn to_value(&self) -> GantryResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// The full template as pretty-printed JSON
    pub fn to_json_pretty(&self) -> GantryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
