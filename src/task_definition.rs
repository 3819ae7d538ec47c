//! Task definitions
//!
//! A task definition groups co-located containers under a shared resource
//! budget. Containers attach incrementally and are immutable afterwards;
//! budget validation is deferred to synthesis so lazy values can settle.

use std::fmt;

use serde_json::{json, Map, Value};

use crate::budget::{check_resource_budget, ResolvedBudget};
use crate::container::{ContainerDefinition, ContainerProps};
use crate::diagnostics::DiagnosticLog;
use crate::error::{GantryError, GantryResult};
use crate::lazy::LazyNumber;
use crate::placement::PlacementConstraint;
use crate::stack::Synthesize;
use crate::template::{Resource, Template};

/// Execution model for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Runs on user-managed hosts with host-level scheduling
    Hosted,
    /// Runs on platform-managed infrastructure; no host to schedule against
    Serverless,
}

impl LaunchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hosted => "hosted",
            Self::Serverless => "serverless",
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Networking mode for the task's containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode {
    /// Containers share the host's bridge network (hosted default)
    Bridge,
    /// Containers use the host network directly
    Host,
    /// The task gets its own network interface (required for serverless)
    Task,
}

impl NetworkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bridge => "bridge",
            Self::Host => "host",
            Self::Task => "task",
        }
    }
}

/// A named volume available to the task's containers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Volume name referenced from mount points
    pub name: String,
    /// Host directory backing the volume, if host-backed
    pub host_source_path: Option<String>,
}

impl Volume {
    fn render(&self) -> Value {
        let mut properties = Map::new();
        if let Some(path) = &self.host_source_path {
            properties.insert("host".to_string(), json!({ "sourcePath": path }));
        }
        properties.insert("name".to_string(), json!(self.name));
        Value::Object(properties)
    }
}

/// Properties for creating a task definition
#[derive(Debug, Clone, Default)]
pub struct TaskDefinitionProps {
    /// Task-level CPU budget in units; serverless defaults to 256
    pub cpu_units: Option<LazyNumber>,
    /// Task-level memory budget in MiB; serverless defaults to 512
    pub memory_mib: Option<LazyNumber>,
    /// Network mode; forced to `Task` under the serverless launch mode
    pub network_mode: Option<NetworkMode>,
    /// Identity the containers assume at runtime
    pub task_role: Option<String>,
    /// Identity the platform assumes to start the task
    pub execution_role: Option<String>,
}

/// Serverless task-level CPU default, in units
pub const SERVERLESS_DEFAULT_CPU_UNITS: u64 = 256;

/// Serverless task-level memory default, in MiB
pub const SERVERLESS_DEFAULT_MEMORY_MIB: u64 = 512;

/// A group of co-located containers with a shared resource budget
#[derive(Debug, Clone)]
pub struct TaskDefinition {
    family: String,
    launch_mode: LaunchMode,
    network_mode: NetworkMode,
    cpu_units: Option<LazyNumber>,
    memory_mib: Option<LazyNumber>,
    task_role: Option<String>,
    execution_role: Option<String>,
    containers: Vec<ContainerDefinition>,
    volumes: Vec<Volume>,
    placement_constraints: Vec<PlacementConstraint>,
}

impl TaskDefinition {
    /// A task definition for user-managed hosts.
    ///
    /// No budget defaults apply; an unset figure means "unbounded".
    pub fn hosted(family: impl Into<String>, props: TaskDefinitionProps) -> Self {
        Self {
            family: family.into(),
            launch_mode: LaunchMode::Hosted,
            network_mode: props.network_mode.unwrap_or(NetworkMode::Bridge),
            cpu_units: props.cpu_units,
            memory_mib: props.memory_mib,
            task_role: props.task_role,
            execution_role: props.execution_role,
            containers: Vec::new(),
            volumes: Vec::new(),
            placement_constraints: Vec::new(),
        }
    }

    /// A task definition for platform-managed infrastructure.
    ///
    /// CPU defaults to 256 units and memory to 512 MiB; the network mode is
    /// always task-scoped regardless of `props.network_mode`.
    pub fn serverless(family: impl Into<String>, props: TaskDefinitionProps) -> Self {
        Self {
            family: family.into(),
            launch_mode: LaunchMode::Serverless,
            network_mode: NetworkMode::Task,
            cpu_units: Some(
                props
                    .cpu_units
                    .unwrap_or_else(|| LazyNumber::fixed(SERVERLESS_DEFAULT_CPU_UNITS)),
            ),
            memory_mib: Some(
                props
                    .memory_mib
                    .unwrap_or_else(|| LazyNumber::fixed(SERVERLESS_DEFAULT_MEMORY_MIB)),
            ),
            task_role: props.task_role,
            execution_role: props.execution_role,
            containers: Vec::new(),
            volumes: Vec::new(),
            placement_constraints: Vec::new(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn launch_mode(&self) -> LaunchMode {
        self.launch_mode
    }

    pub fn network_mode(&self) -> NetworkMode {
        self.network_mode
    }

    pub fn containers(&self) -> &[ContainerDefinition] {
        &self.containers
    }

    pub fn placement_constraints(&self) -> &[PlacementConstraint] {
        &self.placement_constraints
    }

    /// Attach a container.
    ///
    /// Names are unique within the task. A declared hard memory limit must
    /// cover the reservation, and hosted containers must declare at least one
    /// memory figure. Budget checks against the task run later, at synthesis.
    pub fn add_container(
        &mut self,
        name: impl Into<String>,
        props: ContainerProps,
    ) -> GantryResult<&ContainerDefinition> {
        let name = name.into();
        if self.containers.iter().any(|c| c.name() == name) {
            return Err(GantryError::DuplicateContainer {
                family: self.family.clone(),
                name,
            });
        }
        if let (Some(limit), Some(reservation)) = (props.memory_limit_mib, props.memory_reservation_mib)
        {
            if limit < reservation {
                return Err(GantryError::MemoryLimitBelowReservation {
                    container: name,
                    limit_mib: limit,
                    reservation_mib: reservation,
                });
            }
        }
        if self.launch_mode == LaunchMode::Hosted
            && props.memory_limit_mib.is_none()
            && props.memory_reservation_mib.is_none()
        {
            return Err(GantryError::MissingMemorySetting {
                container: name,
                family: self.family.clone(),
            });
        }
        self.containers.push(ContainerDefinition::new(name, props));
        Ok(self.containers.last().expect("container just pushed"))
    }

    /// Add a placement constraint.
    ///
    /// Hard failure on serverless task definitions: there is no host-level
    /// scheduling to constrain, and the constraint is never registered.
    pub fn add_placement_constraint(
        &mut self,
        constraint: PlacementConstraint,
    ) -> GantryResult<()> {
        if self.launch_mode == LaunchMode::Serverless {
            return Err(GantryError::PlacementConstraintUnsupported {
                family: self.family.clone(),
            });
        }
        self.placement_constraints.push(constraint);
        Ok(())
    }

    /// Register a volume for the task's containers
    pub fn add_volume(&mut self, volume: Volume) {
        self.volumes.push(volume);
    }

    /// Force any deferred budget values and return the settled budget
    pub fn resolved_budget(&self) -> ResolvedBudget {
        ResolvedBudget {
            cpu_units: self.cpu_units.as_ref().map(LazyNumber::resolve),
            memory_mib: self.memory_mib.as_ref().map(LazyNumber::resolve),
        }
    }

    fn render(&self, budget: &ResolvedBudget) -> Value {
        let mut properties = Map::new();
        properties.insert(
            "containers".to_string(),
            Value::Array(self.containers.iter().map(ContainerDefinition::render).collect()),
        );
        if let Some(cpu) = budget.cpu_units {
            properties.insert("cpu".to_string(), json!(cpu.to_string()));
        }
        if let Some(role) = &self.execution_role {
            properties.insert("executionRole".to_string(), json!(role));
        }
        properties.insert("family".to_string(), json!(self.family));
        properties.insert("launchMode".to_string(), json!(self.launch_mode.as_str()));
        if let Some(memory) = budget.memory_mib {
            properties.insert("memory".to_string(), json!(memory.to_string()));
        }
        properties.insert("networkMode".to_string(), json!(self.network_mode.as_str()));
        if !self.placement_constraints.is_empty() {
            properties.insert(
                "placementConstraints".to_string(),
                Value::Array(
                    self.placement_constraints
                        .iter()
                        .map(PlacementConstraint::render)
                        .collect(),
                ),
            );
        }
        if let Some(role) = &self.task_role {
            properties.insert("taskRole".to_string(), json!(role));
        }
        if !self.volumes.is_empty() {
            properties.insert(
                "volumes".to_string(),
                Value::Array(self.volumes.iter().map(Volume::render).collect()),
            );
        }
        Value::Object(properties)
    }
}

impl Synthesize for TaskDefinition {
    fn logical_id(&self) -> String {
        self.family.clone()
    }

    fn synthesize(
        &self,
        template: &mut Template,
        diagnostics: &mut DiagnosticLog,
    ) -> GantryResult<()> {
        if self.containers.is_empty() {
            return Err(GantryError::EmptyTaskDefinition {
                family: self.family.clone(),
            });
        }
        let budget = self.resolved_budget();
        check_resource_budget(&self.family, &budget, &self.containers, diagnostics);
        template.add_resource(
            self.family.clone(),
            Resource::new("orchestrator/task-definition", self.render(&budget)),
        )
    }
}
