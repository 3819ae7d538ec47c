//! Property tests for the resource budget validator.

use proptest::prelude::*;

use gantry::budget::{CPU_EXCEEDS_TASK, TOTAL_MEMORY_EXCEEDS_TASK};
use gantry::{check_resource_budget, ContainerDefinition, ContainerProps, DiagnosticLog, ResolvedBudget};

fn arb_container() -> impl Strategy<Value = ContainerDefinition> {
    (
        proptest::string::string_regex("[a-z]{1,12}").unwrap(),
        proptest::option::of(0u64..4096),
        proptest::option::of(0u64..4096),
        proptest::option::of(0u64..4096),
    )
        .prop_map(|(name, cpu_units, memory_limit_mib, memory_reservation_mib)| {
            ContainerDefinition::new(
                name,
                ContainerProps {
                    cpu_units,
                    memory_limit_mib,
                    memory_reservation_mib,
                    ..ContainerProps::image("registry/sample")
                },
            )
        })
}

fn arb_budget() -> impl Strategy<Value = ResolvedBudget> {
    (
        proptest::option::of(1u64..8192),
        proptest::option::of(1u64..8192),
    )
        .prop_map(|(cpu_units, memory_mib)| ResolvedBudget {
            cpu_units,
            memory_mib,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: validation never panics on arbitrary inputs.
    #[test]
    fn property_validation_never_panics(
        budget in arb_budget(),
        containers in proptest::collection::vec(arb_container(), 0..8)
    ) {
        let mut log = DiagnosticLog::new();
        check_resource_budget("Task", &budget, &containers, &mut log);
    }

    /// PROPERTY: re-running on unchanged inputs reproduces the identical
    /// diagnostic sequence.
    #[test]
    fn property_validation_idempotent(
        budget in arb_budget(),
        containers in proptest::collection::vec(arb_container(), 0..8)
    ) {
        let mut first = DiagnosticLog::new();
        check_resource_budget("Task", &budget, &containers, &mut first);
        let mut second = DiagnosticLog::new();
        check_resource_budget("Task", &budget, &containers, &mut second);
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: the CPU warning count equals the number of containers
    /// requesting more CPU than the task declares.
    #[test]
    fn property_cpu_warnings_match_offenders(
        task_cpu in 1u64..4096,
        containers in proptest::collection::vec(arb_container(), 0..8)
    ) {
        let budget = ResolvedBudget { cpu_units: Some(task_cpu), memory_mib: None };
        let mut log = DiagnosticLog::new();
        check_resource_budget("Task", &budget, &containers, &mut log);

        let offenders = containers
            .iter()
            .filter(|c| c.cpu_units().is_some_and(|cpu| cpu > task_cpu))
            .count();
        let cpu_warnings = log
            .warnings()
            .filter(|d| d.message == CPU_EXCEEDS_TASK)
            .count();
        prop_assert_eq!(cpu_warnings, offenders);
    }

    /// PROPERTY: when per-container contributions fit the memory budget, no
    /// total-memory warning fires.
    #[test]
    fn property_no_total_warning_when_sum_fits(
        containers in proptest::collection::vec(arb_container(), 0..8)
    ) {
        let sum: u64 = containers.iter().map(|c| c.memory_contribution_mib()).sum();
        let budget = ResolvedBudget { cpu_units: None, memory_mib: Some(sum.max(1)) };
        let mut log = DiagnosticLog::new();
        check_resource_budget("Task", &budget, &containers, &mut log);

        let total_warnings = log
            .warnings()
            .filter(|d| d.message == TOTAL_MEMORY_EXCEEDS_TASK)
            .count();
        prop_assert_eq!(total_warnings, 0);
    }

    /// PROPERTY: total-memory warnings only ever name memory-declaring
    /// containers, and never more of them than exist.
    #[test]
    fn property_total_warnings_bounded_by_declaring_containers(
        budget in arb_budget(),
        containers in proptest::collection::vec(arb_container(), 0..8)
    ) {
        let mut log = DiagnosticLog::new();
        check_resource_budget("Task", &budget, &containers, &mut log);

        let declaring = containers.iter().filter(|c| c.declares_memory()).count();
        let total_warnings = log
            .warnings()
            .filter(|d| d.message == TOTAL_MEMORY_EXCEEDS_TASK)
            .count();
        prop_assert!(total_warnings <= declaring);
    }
}
