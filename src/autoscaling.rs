//! Task-count autoscaling
//!
//! A service can scale its running task count between a minimum and maximum
//! capacity, driven by CPU utilization or a queue metric. Scaling renders as
//! one scaling-target resource plus one policy resource per rule.

use serde_json::{json, Map, Value};

use crate::error::GantryResult;
use crate::queue::QueueMetric;
use crate::template::{Resource, Template};

/// Properties for target-tracking on CPU utilization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuUtilizationScalingProps {
    /// Average CPU utilization to hold, in percent
    pub target_utilization_percent: u32,
    /// Seconds to wait between scale-in steps
    pub scale_in_cooldown_secs: Option<u64>,
    /// Seconds to wait between scale-out steps
    pub scale_out_cooldown_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
enum PolicyRule {
    CpuUtilization(CpuUtilizationScalingProps),
    QueueMetric(QueueMetric),
}

#[derive(Debug, Clone, PartialEq)]
struct ScalingPolicy {
    id: String,
    rule: PolicyRule,
}

/// Scalable task count attached to a service
#[derive(Debug, Clone, PartialEq)]
pub struct ScalableTaskCount {
    min_capacity: u32,
    max_capacity: u32,
    policies: Vec<ScalingPolicy>,
}

impl ScalableTaskCount {
    /// Scale between one task and `max_capacity` tasks
    pub fn new(max_capacity: u32) -> Self {
        Self {
            min_capacity: 1,
            max_capacity,
            policies: Vec::new(),
        }
    }

    pub fn with_min_capacity(mut self, min_capacity: u32) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn min_capacity(&self) -> u32 {
        self.min_capacity
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    pub fn policy_count(&self) -> usize {
        self.policies.len()
    }

    /// Track average CPU utilization across the service's tasks
    pub fn scale_on_cpu_utilization(
        &mut self,
        id: impl Into<String>,
        props: CpuUtilizationScalingProps,
    ) {
        self.policies.push(ScalingPolicy {
            id: id.into(),
            rule: PolicyRule::CpuUtilization(props),
        });
    }

    /// Track a queue metric, scaling out as the metric grows
    pub fn scale_on_metric(&mut self, id: impl Into<String>, metric: QueueMetric) {
        self.policies.push(ScalingPolicy {
            id: id.into(),
            rule: PolicyRule::QueueMetric(metric),
        });
    }

    /// Render the scaling target and its policies for `service`
    pub(crate) fn render_into(&self, service: &str, template: &mut Template) -> GantryResult<()> {
        let target_id = format!("{service}Scaling");
        template.add_resource(
            target_id.clone(),
            Resource::new(
                "autoscaling/target",
                json!({
                    "maxCapacity": self.max_capacity,
                    "minCapacity": self.min_capacity,
                    "service": service,
                }),
            ),
        )?;

        for policy in &self.policies {
            let mut properties = Map::new();
            match &policy.rule {
                PolicyRule::CpuUtilization(props) => {
                    properties.insert("metric".to_string(), json!("cpu-utilization"));
                    if let Some(cooldown) = props.scale_in_cooldown_secs {
                        properties.insert("scaleInCooldownSecs".to_string(), json!(cooldown));
                    }
                    if let Some(cooldown) = props.scale_out_cooldown_secs {
                        properties.insert("scaleOutCooldownSecs".to_string(), json!(cooldown));
                    }
                    properties.insert(
                        "targetUtilizationPercent".to_string(),
                        json!(props.target_utilization_percent),
                    );
                }
                PolicyRule::QueueMetric(metric) => {
                    properties.insert(
                        "metric".to_string(),
                        json!({ "name": metric.name, "queue": metric.queue }),
                    );
                }
            }
            properties.insert("scalingTarget".to_string(), json!(target_id));
            template.add_resource(
                format!("{target_id}{}", policy.id),
                Resource::new("autoscaling/policy", Value::Object(properties)),
            )?;
        }
        Ok(())
    }
}
