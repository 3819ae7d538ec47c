//! Container definitions
//!
//! A container is attached to a task definition once and never mutated
//! afterwards. Per-container invariants (limit covers reservation, hosted
//! containers declare a memory figure) are enforced at attach time; budget
//! checks against the owning task run later, at synthesis.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::log_driver::LogDriver;

/// Properties for attaching a container to a task definition
///
/// Only `image` is required. Unset resource figures mean "no request".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerProps {
    /// Image reference to start (REQUIRED)
    pub image: String,

    /// CPU units requested for the container
    pub cpu_units: Option<u64>,

    /// Hard memory limit in MiB; the container is killed above it
    pub memory_limit_mib: Option<u64>,

    /// Soft memory reservation in MiB
    pub memory_reservation_mib: Option<u64>,

    /// Whether the task fails when this container stops (default true)
    pub essential: Option<bool>,

    /// Command to run in the container
    pub command: Vec<String>,

    /// Environment variables passed to the container
    pub environment: BTreeMap<String, String>,

    /// Log configuration
    pub logging: Option<LogDriver>,
}

impl ContainerProps {
    /// Props with only the required image set
    pub fn image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }
}

/// A container attached to a task definition
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDefinition {
    name: String,
    image: String,
    cpu_units: Option<u64>,
    memory_limit_mib: Option<u64>,
    memory_reservation_mib: Option<u64>,
    essential: bool,
    command: Vec<String>,
    environment: BTreeMap<String, String>,
    logging: Option<LogDriver>,
}

impl ContainerDefinition {
    /// Build a container definition directly, outside a task.
    ///
    /// Task-level invariants (unique names, hosted memory requirement) are
    /// only enforced by [`TaskDefinition::add_container`].
    ///
    /// [`TaskDefinition::add_container`]: crate::task_definition::TaskDefinition::add_container
    pub fn new(name: impl Into<String>, props: ContainerProps) -> Self {
        Self {
            name: name.into(),
            image: props.image,
            cpu_units: props.cpu_units,
            memory_limit_mib: props.memory_limit_mib,
            memory_reservation_mib: props.memory_reservation_mib,
            essential: props.essential.unwrap_or(true),
            command: props.command,
            environment: props.environment,
            logging: props.logging,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn cpu_units(&self) -> Option<u64> {
        self.cpu_units
    }

    pub fn memory_limit_mib(&self) -> Option<u64> {
        self.memory_limit_mib
    }

    pub fn memory_reservation_mib(&self) -> Option<u64> {
        self.memory_reservation_mib
    }

    pub fn is_essential(&self) -> bool {
        self.essential
    }

    /// Whether any memory figure is declared
    pub fn declares_memory(&self) -> bool {
        self.memory_limit_mib.is_some() || self.memory_reservation_mib.is_some()
    }

    /// The container's share of the task memory budget: the larger of its
    /// declared figures, or zero when none is set
    pub fn memory_contribution_mib(&self) -> u64 {
        self.memory_limit_mib
            .unwrap_or(0)
            .max(self.memory_reservation_mib.unwrap_or(0))
    }

    pub(crate) fn render(&self) -> Value {
        let mut properties = Map::new();
        if !self.command.is_empty() {
            properties.insert("command".to_string(), json!(self.command));
        }
        if let Some(cpu) = self.cpu_units {
            properties.insert("cpu".to_string(), json!(cpu));
        }
        if !self.environment.is_empty() {
            properties.insert("environment".to_string(), json!(self.environment));
        }
        properties.insert("essential".to_string(), json!(self.essential));
        properties.insert("image".to_string(), json!(self.image));
        if let Some(logging) = &self.logging {
            properties.insert("logging".to_string(), logging.render());
        }
        if let Some(limit) = self.memory_limit_mib {
            properties.insert("memoryLimitMiB".to_string(), json!(limit));
        }
        if let Some(reservation) = self.memory_reservation_mib {
            properties.insert("memoryReservationMiB".to_string(), json!(reservation));
        }
        properties.insert("name".to_string(), json!(self.name));
        Value::Object(properties)
    }
}
