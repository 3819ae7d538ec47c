//! Queue-worker services
//!
//! A pattern construct wiring together a worker queue, a task definition with
//! a single logged container, a service keeping workers running, and
//! autoscaling on CPU utilization and queue depth.

use std::collections::BTreeMap;

use crate::autoscaling::CpuUtilizationScalingProps;
use crate::cluster::Cluster;
use crate::container::ContainerProps;
use crate::diagnostics::DiagnosticLog;
use crate::error::GantryResult;
use crate::log_driver::LogDriver;
use crate::queue::{Queue, QueueProps};
use crate::scheduled_task::split_command;
use crate::service::{Service, ServiceProps};
use crate::stack::Synthesize;
use crate::task_definition::{TaskDefinition, TaskDefinitionProps};
use crate::template::Template;

/// Properties for a queue-worker service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueWorkerServiceProps {
    /// Image to start (REQUIRED)
    pub image: String,

    /// Command for the container, delimited by commas
    pub command: Option<String>,

    /// CPU units to reserve for the container
    pub cpu_units: Option<u64>,

    /// Number of worker copies to keep running (default 1)
    pub desired_count: Option<u32>,

    /// Whether to attach managed logging to the container (default true)
    pub enable_logging: Option<bool>,

    /// Environment variables passed to the container
    pub environment: BTreeMap<String, String>,

    /// Hard memory limit in MiB; at least one memory figure is required
    pub memory_limit_mib: Option<u64>,

    /// Soft memory reservation in MiB; at least one memory figure is required
    pub memory_reservation_mib: Option<u64>,

    /// Physical name for the worker queue; platform-generated when unset
    pub queue_name: Option<String>,
}

/// Ceiling for queue-worker autoscaling
const WORKER_MAX_CAPACITY: u32 = 2;

/// A worker service consuming from a queue
#[derive(Debug, Clone)]
pub struct QueueWorkerService {
    id: String,
    task_definition: TaskDefinition,
    queue: Queue,
    service: Service,
}

impl QueueWorkerService {
    /// Build the queue, task definition, service and scaling policies
    pub fn new(
        id: impl Into<String>,
        cluster: &Cluster,
        props: QueueWorkerServiceProps,
    ) -> GantryResult<Self> {
        let id = id.into();
        let logging = props.enable_logging.unwrap_or(true);

        let mut task_definition = TaskDefinition::hosted(
            format!("{id}QueueWorkerTaskDef"),
            TaskDefinitionProps::default(),
        );
        task_definition.add_container(
            "QueueWorkerContainer",
            ContainerProps {
                cpu_units: props.cpu_units,
                memory_limit_mib: props.memory_limit_mib,
                memory_reservation_mib: props.memory_reservation_mib,
                command: split_command(props.command.as_deref()),
                environment: props.environment,
                logging: logging.then(|| LogDriver::managed(&id)),
                ..ContainerProps::image(props.image)
            },
        )?;

        let queue = Queue::new(
            format!("{id}WorkerQueue"),
            QueueProps {
                queue_name: props.queue_name,
            },
        );

        let mut service = Service::hosted(
            format!("{id}Service"),
            cluster,
            &task_definition,
            ServiceProps {
                desired_count: Some(props.desired_count.unwrap_or(1)),
            },
        )?;

        let scaling = service.auto_scale_task_count(WORKER_MAX_CAPACITY);
        scaling.scale_on_cpu_utilization(
            "CpuScaling",
            CpuUtilizationScalingProps {
                target_utilization_percent: 50,
                scale_in_cooldown_secs: Some(60),
                scale_out_cooldown_secs: Some(60),
            },
        );
        scaling.scale_on_metric("QueueDepthScaling", queue.metric_messages_not_visible());

        Ok(Self {
            id,
            task_definition,
            queue,
            service,
        })
    }

    pub fn task_definition(&self) -> &TaskDefinition {
        &self.task_definition
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn service(&self) -> &Service {
        &self.service
    }
}

impl Synthesize for QueueWorkerService {
    fn logical_id(&self) -> String {
        self.id.clone()
    }

    fn synthesize(
        &self,
        template: &mut Template,
        diagnostics: &mut DiagnosticLog,
    ) -> GantryResult<()> {
        self.task_definition.synthesize(template, diagnostics)?;
        self.queue.synthesize(template, diagnostics)?;
        self.service.synthesize(template, diagnostics)?;
        template.add_output(format!("{}QueueName", self.id), self.queue.name_ref());
        Ok(())
    }
}
