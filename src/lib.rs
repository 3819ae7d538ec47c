//! Gantry - declarative container orchestration templates
//!
//! Gantry assembles descriptions of containerized workloads (task
//! definitions, services, scheduled tasks, queue workers, autoscaling) and
//! emits them as a deterministic JSON deployment template for an external
//! managed orchestration platform. Nothing runs here: assembly is in-process,
//! validation is one synchronous pass at synthesis time, and all scheduling
//! and scaling is delegated to the platform consuming the template.

pub mod autoscaling;
pub mod budget;
pub mod cluster;
pub mod container;
pub mod diagnostics;
pub mod error;
pub mod lazy;
pub mod log_driver;
pub mod placement;
pub mod queue;
pub mod queue_worker;
pub mod scheduled_task;
pub mod service;
pub mod stack;
pub mod task_definition;
pub mod template;

// Re-exports for convenience
pub use autoscaling::{CpuUtilizationScalingProps, ScalableTaskCount};
pub use budget::{check_resource_budget, ResolvedBudget};
pub use cluster::Cluster;
pub use container::{ContainerDefinition, ContainerProps};
pub use diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink, Severity};
pub use error::{GantryError, GantryResult};
pub use lazy::LazyNumber;
pub use log_driver::LogDriver;
pub use placement::PlacementConstraint;
pub use queue::{Queue, QueueMetric, QueueProps};
pub use queue_worker::{QueueWorkerService, QueueWorkerServiceProps};
pub use scheduled_task::{ScheduledTask, ScheduledTaskProps};
pub use service::{Service, ServiceProps};
pub use stack::{Stack, SynthOutput, Synthesize};
pub use task_definition::{
    LaunchMode, NetworkMode, TaskDefinition, TaskDefinitionProps, Volume,
};
pub use template::{Resource, Template};
