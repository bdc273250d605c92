//! Snapshot capture, serialization and validation

use triage_simulator_core_rs::orchestrator::{
    compute_config_hash, validate_snapshot, StateSnapshot,
};
use triage_simulator_core_rs::{
    EngineStatus, GeneratorConfig, Orchestrator, OrchestratorConfig, PatientGenerator,
    SimulationError,
};

fn completed_day(seed: u64) -> Orchestrator {
    let input = PatientGenerator::new(GeneratorConfig::default(), seed)
        .unwrap()
        .generate();
    let mut orchestrator = Orchestrator::new(OrchestratorConfig::default(), input).unwrap();
    orchestrator.run().unwrap();
    orchestrator
}

#[test]
fn test_snapshot_of_completed_day_is_valid() {
    let orchestrator = completed_day(12345);
    let snapshot = orchestrator.snapshot().unwrap();

    assert_eq!(snapshot.current_tick, 1440);
    assert_eq!(snapshot.status, EngineStatus::Completed);
    assert_eq!(snapshot.served.len(), 142);
    assert_eq!(snapshot.dispatch_queue.len(), 2);
    assert_eq!(snapshot.patients.len(), 144);
    assert_eq!(snapshot.areas.len(), 3);
    assert!(validate_snapshot(&snapshot).is_ok());
}

#[test]
fn test_snapshot_patients_sorted_by_id() {
    let snapshot = completed_day(1).snapshot().unwrap();
    let ids: Vec<&str> = snapshot.patients.iter().map(|p| p.id()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn test_snapshot_mid_run_is_valid() {
    let input = PatientGenerator::new(GeneratorConfig::default(), 99)
        .unwrap()
        .generate();
    let mut orchestrator = Orchestrator::new(OrchestratorConfig::default(), input).unwrap();
    for _ in 0..500 {
        orchestrator.tick().unwrap();
    }

    let snapshot = orchestrator.snapshot().unwrap();
    assert_eq!(snapshot.current_tick, 500);
    assert_eq!(snapshot.status, EngineStatus::Running);
    assert_eq!(snapshot.injected, 50);
    assert!(validate_snapshot(&snapshot).is_ok());
}

#[test]
fn test_snapshot_json_round_trip() {
    let snapshot = completed_day(12345).snapshot().unwrap();
    let json = snapshot.to_json().unwrap();
    let restored = StateSnapshot::from_json(&json).unwrap();

    assert_eq!(restored.served, snapshot.served);
    assert_eq!(restored.dispatch_queue, snapshot.dispatch_queue);
    assert_eq!(restored.config_hash, snapshot.config_hash);
    assert_eq!(restored.clock, snapshot.clock);
    assert!(validate_snapshot(&restored).is_ok());
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(matches!(
        StateSnapshot::from_json("{\"current_tick\": }"),
        Err(SimulationError::SerializationError(_))
    ));
}

#[test]
fn test_validate_detects_orphaned_queue_entry() {
    let mut snapshot = completed_day(12345).snapshot().unwrap();
    snapshot.dispatch_queue.push("P0000".to_string());

    assert!(matches!(
        validate_snapshot(&snapshot),
        Err(SimulationError::StateValidationError(_))
    ));
}

#[test]
fn test_validate_detects_double_service() {
    let mut snapshot = completed_day(12345).snapshot().unwrap();
    let first = snapshot.served[0].clone();
    snapshot.served.push(first);

    assert!(validate_snapshot(&snapshot).is_err());
}

#[test]
fn test_validate_detects_served_patient_in_queue() {
    let mut snapshot = completed_day(12345).snapshot().unwrap();
    let served = snapshot.served[0].clone();
    snapshot.dispatch_queue.push(served);

    assert!(validate_snapshot(&snapshot).is_err());
}

#[test]
fn test_validate_detects_over_capacity_area() {
    let mut snapshot = completed_day(12345).snapshot().unwrap();
    snapshot.areas[0].capacity = 0;
    snapshot.areas[0].queued.push("P9999".to_string());

    assert!(validate_snapshot(&snapshot).is_err());
}

#[test]
fn test_config_hash_stable_and_sensitive() {
    let config = OrchestratorConfig::default();
    let hash = compute_config_hash(&config).unwrap();

    assert_eq!(hash.len(), 64);
    assert_eq!(hash, compute_config_hash(&config.clone()).unwrap());

    let other = OrchestratorConfig {
        daily_quota: 100,
        ..OrchestratorConfig::default()
    };
    assert_ne!(hash, compute_config_hash(&other).unwrap());

    let snapshot = completed_day(3).snapshot().unwrap();
    assert_eq!(snapshot.config_hash, hash);
}
