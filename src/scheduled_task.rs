//! Scheduled tasks
//!
//! A pattern construct: a task definition with a single logged container,
//! started by the platform's event scheduler on a schedule expression rather
//! than kept running by a service.

use std::collections::BTreeMap;

use serde_json::json;

use crate::cluster::Cluster;
use crate::container::ContainerProps;
use crate::diagnostics::DiagnosticLog;
use crate::error::GantryResult;
use crate::log_driver::LogDriver;
use crate::stack::Synthesize;
use crate::task_definition::{TaskDefinition, TaskDefinitionProps};
use crate::template::{Resource, Template};

/// Properties for a scheduled task
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledTaskProps {
    /// Image to start (REQUIRED)
    pub image: String,

    /// Schedule or rate expression driving the event rule (REQUIRED)
    pub schedule_expression: String,

    /// Command for the container, delimited by commas
    pub command: Option<String>,

    /// CPU units to reserve for the container
    pub cpu_units: Option<u64>,

    /// Number of task copies started per scheduled run (default 1)
    pub desired_task_count: Option<u32>,

    /// Environment variables passed to the container
    pub environment: BTreeMap<String, String>,

    /// Hard memory limit in MiB; at least one memory figure is required
    pub memory_limit_mib: Option<u64>,

    /// Soft memory reservation in MiB; at least one memory figure is required
    pub memory_reservation_mib: Option<u64>,
}

/// A task started on a schedule
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    id: String,
    cluster: String,
    task_definition: TaskDefinition,
    schedule_expression: String,
    desired_task_count: u32,
}

impl ScheduledTask {
    /// Build the task definition, logged container and event rule
    pub fn new(
        id: impl Into<String>,
        cluster: &Cluster,
        props: ScheduledTaskProps,
    ) -> GantryResult<Self> {
        let id = id.into();

        let mut task_definition =
            TaskDefinition::hosted(format!("{id}ScheduledTaskDef"), TaskDefinitionProps::default());
        task_definition.add_container(
            "ScheduledContainer",
            ContainerProps {
                cpu_units: props.cpu_units,
                memory_limit_mib: props.memory_limit_mib,
                memory_reservation_mib: props.memory_reservation_mib,
                command: split_command(props.command.as_deref()),
                environment: props.environment,
                logging: Some(LogDriver::managed(&id)),
                ..ContainerProps::image(props.image)
            },
        )?;

        Ok(Self {
            cluster: cluster.name().to_string(),
            task_definition,
            schedule_expression: props.schedule_expression,
            desired_task_count: props.desired_task_count.unwrap_or(1),
            id,
        })
    }

    pub fn task_definition(&self) -> &TaskDefinition {
        &self.task_definition
    }

    pub fn desired_task_count(&self) -> u32 {
        self.desired_task_count
    }
}

impl Synthesize for ScheduledTask {
    fn logical_id(&self) -> String {
        self.id.clone()
    }

    fn synthesize(
        &self,
        template: &mut Template,
        diagnostics: &mut DiagnosticLog,
    ) -> GantryResult<()> {
        self.task_definition.synthesize(template, diagnostics)?;
        template.add_resource(
            format!("{}ScheduledEventRule", self.id),
            Resource::new(
                "events/rule",
                json!({
                    "scheduleExpression": self.schedule_expression,
                    "target": {
                        "cluster": self.cluster,
                        "taskCount": self.desired_task_count,
                        "taskDefinition": self.task_definition.family(),
                    },
                }),
            ),
        )
    }
}

pub(crate) fn split_command(command: Option<&str>) -> Vec<String> {
    command
        .map(|c| c.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}
