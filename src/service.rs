//! Long-running services
//!
//! A service keeps a desired number of copies of a task definition running in
//! a cluster. The service captures the task definition's family and launch
//! mode at construction; the launch mode must match the constructor used.

use serde_json::json;

use crate::autoscaling::ScalableTaskCount;
use crate::cluster::Cluster;
use crate::diagnostics::DiagnosticLog;
use crate::error::{GantryError, GantryResult};
use crate::stack::Synthesize;
use crate::task_definition::{LaunchMode, TaskDefinition};
use crate::template::{Resource, Template};

/// Properties for creating a service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProps {
    /// Number of task copies to keep running (default 1)
    pub desired_count: Option<u32>,
}

/// A long-running service backed by a task definition
#[derive(Debug, Clone)]
pub struct Service {
    name: String,
    cluster: String,
    task_family: String,
    launch_mode: LaunchMode,
    desired_count: u32,
    scaling: Option<ScalableTaskCount>,
}

impl Service {
    /// A service on user-managed hosts; the task definition must be hosted
    pub fn hosted(
        name: impl Into<String>,
        cluster: &Cluster,
        task_definition: &TaskDefinition,
        props: ServiceProps,
    ) -> GantryResult<Self> {
        Self::bind(name, cluster, task_definition, LaunchMode::Hosted, props)
    }

    /// A service on platform-managed infrastructure; the task definition must
    /// be serverless
    pub fn serverless(
        name: impl Into<String>,
        cluster: &Cluster,
        task_definition: &TaskDefinition,
        props: ServiceProps,
    ) -> GantryResult<Self> {
        Self::bind(name, cluster, task_definition, LaunchMode::Serverless, props)
    }

    fn bind(
        name: impl Into<String>,
        cluster: &Cluster,
        task_definition: &TaskDefinition,
        expected: LaunchMode,
        props: ServiceProps,
    ) -> GantryResult<Self> {
        let name = name.into();
        if task_definition.launch_mode() != expected {
            return Err(GantryError::LaunchModeMismatch {
                service: name,
                family: task_definition.family().to_string(),
                expected,
                actual: task_definition.launch_mode(),
            });
        }
        Ok(Self {
            name,
            cluster: cluster.name().to_string(),
            task_family: task_definition.family().to_string(),
            launch_mode: expected,
            desired_count: props.desired_count.unwrap_or(1),
            scaling: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desired_count(&self) -> u32 {
        self.desired_count
    }

    pub fn launch_mode(&self) -> LaunchMode {
        self.launch_mode
    }

    /// Enable autoscaling of the task count up to `max_capacity`
    pub fn auto_scale_task_count(&mut self, max_capacity: u32) -> &mut ScalableTaskCount {
        self.scaling.insert(ScalableTaskCount::new(max_capacity))
    }

    pub fn scaling(&self) -> Option<&ScalableTaskCount> {
        self.scaling.as_ref()
    }
}

impl Synthesize for Service {
    fn logical_id(&self) -> String {
        self.name.clone()
    }

    fn synthesize(
        &self,
        template: &mut Template,
        _diagnostics: &mut DiagnosticLog,
    ) -> GantryResult<()> {
        template.add_resource(
            self.name.clone(),
            Resource::new(
                "orchestrator/service",
                json!({
                    "cluster": self.cluster,
                    "desiredCount": self.desired_count,
                    "launchMode": self.launch_mode.as_str(),
                    "taskDefinition": self.task_family,
                }),
            ),
        )?;
        if let Some(scaling) = &self.scaling {
            scaling.render_into(&self.name, template)?;
        }
        Ok(())
    }
}
