//! End-to-end synthesis of the pattern constructs (scheduled tasks and
//! queue-worker services) through a stack with a cluster.

use std::collections::BTreeMap;

use gantry::{
    Cluster, QueueWorkerService, QueueWorkerServiceProps, ScheduledTask, ScheduledTaskProps, Stack,
};

#[test]
fn scheduled_task_emits_task_definition_and_event_rule() -> anyhow::Result<()> {
    let cluster = Cluster::new("prod");
    let scheduled = ScheduledTask::new(
        "Nightly",
        &cluster,
        ScheduledTaskProps {
            image: "registry/reaper".to_string(),
            schedule_expression: "rate(1 day)".to_string(),
            command: Some("sweep,--all".to_string()),
            memory_limit_mib: Some(512),
            ..ScheduledTaskProps::default()
        },
    )?;

    let mut stack = Stack::new("scheduled");
    stack.add(cluster);
    stack.add(scheduled);

    let out = stack.synth()?;
    assert!(out.diagnostics.is_empty());
    assert_eq!(out.template.resource_count(), 3);

    let rule = out.template.resource("NightlyScheduledEventRule").unwrap();
    assert_eq!(rule.kind, "events/rule");
    assert_eq!(rule.properties["scheduleExpression"], "rate(1 day)");
    assert_eq!(
        rule.properties["target"]["taskDefinition"],
        "NightlyScheduledTaskDef"
    );
    assert_eq!(rule.properties["target"]["cluster"], "prod");
    assert_eq!(rule.properties["target"]["taskCount"], 1);

    let task = out.template.resource("NightlyScheduledTaskDef").unwrap();
    let container = &task.properties["containers"][0];
    assert_eq!(container["name"], "ScheduledContainer");
    assert_eq!(container["command"], serde_json::json!(["sweep", "--all"]));
    assert_eq!(container["logging"]["options"]["streamPrefix"], "Nightly");
    Ok(())
}

#[test]
fn queue_worker_emits_full_resource_set() -> anyhow::Result<()> {
    let cluster = Cluster::new("prod");
    let mut environment = BTreeMap::new();
    environment.insert("QUEUE_URL".to_string(), "${JobsWorkerQueue.url}".to_string());

    let worker = QueueWorkerService::new(
        "Jobs",
        &cluster,
        QueueWorkerServiceProps {
            image: "registry/worker".to_string(),
            command: Some("consume,--batch,10".to_string()),
            cpu_units: Some(128),
            memory_reservation_mib: Some(256),
            environment,
            queue_name: Some("jobs-inbox".to_string()),
            ..QueueWorkerServiceProps::default()
        },
    )?;

    let mut stack = Stack::new("worker");
    stack.add(cluster);
    stack.add(worker);

    let out = stack.synth()?;
    assert!(out.diagnostics.is_empty());
    // cluster + task definition + queue + service + scaling target + 2 policies
    assert_eq!(out.template.resource_count(), 7);

    let service = out.template.resource("JobsService").unwrap();
    assert_eq!(service.properties["cluster"], "prod");
    assert_eq!(service.properties["desiredCount"], 1);
    assert_eq!(service.properties["launchMode"], "hosted");

    let target = out.template.resource("JobsServiceScaling").unwrap();
    assert_eq!(target.properties["maxCapacity"], 2);
    assert_eq!(target.properties["minCapacity"], 1);

    let cpu = out
        .template
        .resource("JobsServiceScalingCpuScaling")
        .unwrap();
    assert_eq!(cpu.properties["metric"], "cpu-utilization");
    assert_eq!(cpu.properties["targetUtilizationPercent"], 50);

    let depth = out
        .template
        .resource("JobsServiceScalingQueueDepthScaling")
        .unwrap();
    assert_eq!(depth.properties["metric"]["queue"], "JobsWorkerQueue");

    assert_eq!(
        out.template.outputs().get("JobsQueueName").map(String::as_str),
        Some("${JobsWorkerQueue.queueName}")
    );
    Ok(())
}

#[test]
fn hosted_worker_without_budget_never_warns() -> anyhow::Result<()> {
    // Hosted task definitions declare no budget by default, so container
    // sizing passes through without warnings.
    let cluster = Cluster::new("prod");
    let worker = QueueWorkerService::new(
        "Jobs",
        &cluster,
        QueueWorkerServiceProps {
            image: "registry/worker".to_string(),
            memory_limit_mib: Some(512),
            ..QueueWorkerServiceProps::default()
        },
    )?;

    let mut stack = Stack::new("worker");
    stack.add(cluster);
    stack.add(worker);
    let out = stack.synth()?;
    assert!(out.diagnostics.is_empty());
    Ok(())
}
