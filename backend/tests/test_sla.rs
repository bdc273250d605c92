//! Tests for SLA classification and wait statistics

use proptest::prelude::*;
use triage_simulator_core_rs::orchestrator::{BreachRecord, BreachReport, WaitStatistics};
use triage_simulator_core_rs::{Category, SlaPolicy};

#[test]
fn test_c1_waiting_zero_minutes_is_not_breach() {
    assert!(!SlaPolicy::default().is_breach(Category::C1, 0));
}

#[test]
fn test_c1_waiting_one_minute_is_breach() {
    assert!(SlaPolicy::default().is_breach(Category::C1, 1));
}

#[test]
fn test_limits_are_inclusive() {
    let sla = SlaPolicy::default();
    for (category, limit) in [
        (Category::C2, 30),
        (Category::C3, 90),
        (Category::C4, 180),
    ] {
        assert!(!sla.is_breach(category, limit), "{} at limit", category);
        assert!(sla.is_breach(category, limit + 1), "{} past limit", category);
    }
}

#[test]
fn test_c5_never_breaches() {
    let sla = SlaPolicy::default();
    assert_eq!(sla.max_wait(Category::C5), None);
    assert!(!sla.is_breach(Category::C5, u64::MAX));
}

#[test]
fn test_custom_policy() {
    let sla = SlaPolicy {
        max_wait_minutes: [Some(5), None, None, None, Some(0)],
    };
    assert!(sla.is_breach(Category::C1, 6));
    assert!(!sla.is_breach(Category::C2, 1_000));
    assert!(sla.is_breach(Category::C5, 1));
}

#[test]
fn test_statistics_running_worst_and_average() {
    let mut stats = WaitStatistics::new();
    stats.record_wait(Category::C3, 10);
    stats.record_wait(Category::C3, 40);
    stats.record_wait(Category::C3, 25);

    assert_eq!(stats.worst_wait(Category::C3), 40);
    assert_eq!(stats.average_wait(Category::C3), 25.0);
    assert_eq!(stats.served_count(Category::C3), 3);
    assert_eq!(stats.waits(Category::C3), &[10, 40, 25]);
}

#[test]
fn test_empty_category_summarizes_to_zero() {
    let stats = WaitStatistics::new();
    let summary = stats.summarize();

    assert_eq!(summary.len(), 5);
    for row in summary {
        assert_eq!(row.served, 0);
        assert_eq!(row.worst_wait, 0);
        assert_eq!(row.average_wait, 0.0);
    }
}

#[test]
fn test_breach_report_measures_elapsed_at_close() {
    let record = BreachRecord {
        patient_id: "P1003".to_string(),
        category: Category::C1,
        wait_minutes: 71,
        limit_minutes: 0,
        arrival_time: 1800,
    };

    let report = BreachReport::from_record(&record, 18060);
    assert_eq!(report.wait_minutes, 71);
    assert_eq!(report.elapsed_at_close_minutes, 271);
}

proptest! {
    #[test]
    fn prop_is_breach_is_pure(level in 1u8..=5, wait in 0u64..100_000) {
        let sla = SlaPolicy::default();
        let category = Category::new(level).unwrap();

        let first = sla.is_breach(category, wait);
        prop_assert_eq!(first, sla.is_breach(category, wait));

        let expected = match sla.max_wait(category) {
            Some(limit) => wait > limit,
            None => false,
        };
        prop_assert_eq!(first, expected);
    }

    #[test]
    fn prop_worst_is_max_of_recorded(waits in prop::collection::vec(0u64..10_000, 1..50)) {
        let mut stats = WaitStatistics::new();
        for &wait in &waits {
            stats.record_wait(Category::C4, wait);
        }
        prop_assert_eq!(stats.worst_wait(Category::C4), *waits.iter().max().unwrap());
        prop_assert_eq!(stats.total_recorded(), waits.len());
    }
}
