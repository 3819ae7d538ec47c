//! Resource budget validation
//!
//! Pure domain logic for checking per-container resource requests against the
//! owning task definition's declared budget. Runs once per synthesis, after
//! all containers are attached and lazy budget values have been resolved.
//! Violations are warnings, never errors; emission proceeds regardless.

use crate::container::ContainerDefinition;
use crate::diagnostics::DiagnosticSink;

/// Warning for a container requesting more CPU than the task declares
pub const CPU_EXCEEDS_TASK: &str =
    "CPU specified for the container cannot be greater than the CPU for the task definition";

/// Warning for a container's hard memory limit above the task memory
pub const MEMORY_EXCEEDS_TASK: &str =
    "Memory specified for the container cannot be greater than the memory for the task definition";

/// Warning for the cumulative container memory ask above the task memory
pub const TOTAL_MEMORY_EXCEEDS_TASK: &str =
    "Total memory specified for all containers cannot be greater than the memory for the task definition";

/// A task budget with lazy values forced
///
/// An absent figure means the task declares no ceiling for that resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedBudget {
    pub cpu_units: Option<u64>,
    pub memory_mib: Option<u64>,
}

/// Check all container requests against the task budget.
///
/// Deterministic single pass in attachment order:
/// - each container asking for more CPU than the task gets one CPU warning;
/// - each container with a hard memory limit above the task memory gets one
///   memory warning;
/// - when per-container memory contributions sum past the task memory, one
///   total-memory warning is emitted for every memory-declaring container up
///   to and including the first container whose running total crosses the
///   budget. Containers attached after the crossing stay silent.
///
/// Warnings carry the construct path `family/container`. Re-running on
/// unchanged inputs reproduces the identical sequence.
pub fn check_resource_budget(
    family: &str,
    budget: &ResolvedBudget,
    containers: &[ContainerDefinition],
    sink: &mut impl DiagnosticSink,
) {
    if let Some(task_cpu) = budget.cpu_units {
        for container in containers {
            if container.cpu_units().is_some_and(|cpu| cpu > task_cpu) {
                sink.warn(&container_path(family, container), CPU_EXCEEDS_TASK);
            }
        }
    }

    let Some(task_memory) = budget.memory_mib else {
        return;
    };

    for container in containers {
        if container
            .memory_limit_mib()
            .is_some_and(|limit| limit > task_memory)
        {
            sink.warn(&container_path(family, container), MEMORY_EXCEEDS_TASK);
        }
    }

    let mut running_total = 0u64;
    let mut crossing = None;
    for (index, container) in containers.iter().enumerate() {
        running_total = running_total.saturating_add(container.memory_contribution_mib());
        if running_total > task_memory {
            crossing = Some(index);
            break;
        }
    }
    if let Some(crossing) = crossing {
        for container in containers[..=crossing]
            .iter()
            .filter(|c| c.declares_memory())
        {
            sink.warn(&container_path(family, container), TOTAL_MEMORY_EXCEEDS_TASK);
        }
    }
}

fn container_path(family: &str, container: &ContainerDefinition) -> String {
    format!("{family}/{}", container.name())
}
