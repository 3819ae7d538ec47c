//! Worker queues
//!
//! A minimal queue resource for the queue-worker pattern. The queue exposes
//! metric handles that autoscaling policies can track.

use serde_json::{json, Map, Value};

use crate::diagnostics::DiagnosticLog;
use crate::error::GantryResult;
use crate::stack::Synthesize;
use crate::template::{Resource, Template};

/// Properties for creating a queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueProps {
    /// Physical queue name; platform-generated when unset
    pub queue_name: Option<String>,
}

/// A message queue feeding worker tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    id: String,
    queue_name: Option<String>,
}

/// A metric published by a queue, referenced by scaling policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMetric {
    /// Logical id of the queue publishing the metric
    pub queue: String,
    /// Metric name, e.g. `messages-not-visible`
    pub name: String,
}

impl Queue {
    pub fn new(id: impl Into<String>, props: QueueProps) -> Self {
        Self {
            id: id.into(),
            queue_name: props.queue_name,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn queue_name(&self) -> Option<&str> {
        self.queue_name.as_deref()
    }

    /// Reference token for the queue's physical name, settled at deploy time
    pub fn name_ref(&self) -> String {
        format!("${{{}.queueName}}", self.id)
    }

    /// Messages published to the queue
    pub fn metric_messages_sent(&self) -> QueueMetric {
        QueueMetric {
            queue: self.id.clone(),
            name: "messages-sent".to_string(),
        }
    }

    /// Messages delivered but not yet acknowledged
    pub fn metric_messages_not_visible(&self) -> QueueMetric {
        QueueMetric {
            queue: self.id.clone(),
            name: "messages-not-visible".to_string(),
        }
    }
}

impl Synthesize for Queue {
    fn logical_id(&self) -> String {
        self.id.clone()
    }

    fn synthesize(
        &self,
        template: &mut Template,
        _diagnostics: &mut DiagnosticLog,
    ) -> GantryResult<()> {
        let mut properties = Map::new();
        if let Some(name) = &self.queue_name {
            properties.insert("queueName".to_string(), json!(name));
        }
        template.add_resource(
            self.id.clone(),
            Resource::new("messaging/queue", Value::Object(properties)),
        )
    }
}
