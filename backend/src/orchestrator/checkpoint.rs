//! Snapshot - Capture Simulation State
//!
//! Serializes the registry, queues and statistics of a run so a completed
//! (or paused) day can be audited or handed to a reporting consumer. The
//! snapshot is an in-memory value; nothing is written to disk here.
//!
//! # Critical Invariants
//!
//! - **Queue Integrity**: every queued id refers to a known patient
//! - **Single Service**: served ids are unique and never queued
//! - **Capacity**: no area holds more patients than its capacity
//! - **Config Matching**: `config_hash` identifies the config that produced the state

use crate::models::{Patient, PatientStatus};
use crate::orchestrator::engine::{EngineStatus, Orchestrator, OrchestratorConfig, SimulationError};
use crate::orchestrator::metrics::WaitStatistics;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete orchestrator state snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Next tick to execute
    pub current_tick: usize,

    /// Clock reading in units
    pub clock: u64,

    pub status: EngineStatus,
    pub injected: usize,
    pub in_flight: usize,

    /// All registered patients, sorted by id
    pub patients: Vec<Patient>,

    /// Global dispatch queue in dispatch order
    pub dispatch_queue: Vec<String>,

    pub areas: Vec<AreaSnapshot>,

    /// Served ids in dispatch order
    pub served: Vec<String>,

    pub statistics: WaitStatistics,

    /// SHA256 hash of the config that produced this state
    pub config_hash: String,
}

/// Area queue snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub name: String,
    pub capacity: usize,
    /// Queued ids in area dispatch order
    pub queued: Vec<String>,
}

impl StateSnapshot {
    /// Capture the orchestrator's current state
    pub fn capture(orchestrator: &Orchestrator) -> Result<Self, SimulationError> {
        let registry = orchestrator.registry();

        let mut patients: Vec<Patient> = registry.patients().values().cloned().collect();
        patients.sort_by(|a, b| a.id().cmp(b.id()));

        let areas = registry
            .areas()
            .map(|area| AreaSnapshot {
                name: area.name().to_string(),
                capacity: area.capacity(),
                queued: area.queued_ids().map(str::to_string).collect(),
            })
            .collect();

        Ok(Self {
            current_tick: orchestrator.current_tick(),
            clock: orchestrator.now(),
            status: orchestrator.status(),
            injected: orchestrator.injected_count(),
            in_flight: orchestrator.in_flight(),
            patients,
            dispatch_queue: registry.dispatch_queue().iter().map(str::to_string).collect(),
            areas,
            served: registry.served_ids().to_vec(),
            statistics: orchestrator.statistics().clone(),
            config_hash: compute_config_hash(orchestrator.config())?,
        })
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot serialization failed: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot parsing failed: {}", e))
        })
    }
}

impl Orchestrator {
    /// Snapshot of the current state
    pub fn snapshot(&self) -> Result<StateSnapshot, SimulationError> {
        StateSnapshot::capture(self)
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// SHA-256 fingerprint of an engine config
///
/// Hashes the config's JSON value form, whose object keys are always sorted,
/// so field declaration order and input key order do not matter.
pub fn compute_config_hash(config: &OrchestratorConfig) -> Result<String, SimulationError> {
    let json = serde_json::to_value(config)
        .and_then(|value| serde_json::to_string(&value))
        .map_err(|e| {
            SimulationError::SerializationError(format!("Config serialization failed: {}", e))
        })?;

    Ok(format!("{:x}", Sha256::digest(json.as_bytes())))
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate snapshot integrity
///
/// Checks:
/// - queued ids (global and area) refer to known, waiting patients
/// - served ids are unique, known, marked served and not queued anywhere
/// - areas respect their capacity
pub fn validate_snapshot(snapshot: &StateSnapshot) -> Result<(), SimulationError> {
    let known: HashSet<&str> = snapshot.patients.iter().map(Patient::id).collect();
    let waiting: HashSet<&str> = snapshot
        .patients
        .iter()
        .filter(|p| p.is_waiting())
        .map(Patient::id)
        .collect();

    // 1. Dispatch queue referential integrity
    for id in &snapshot.dispatch_queue {
        if !known.contains(id.as_str()) {
            return Err(SimulationError::StateValidationError(format!(
                "Orphaned patient in dispatch queue: {}",
                id
            )));
        }
        if !waiting.contains(id.as_str()) {
            return Err(SimulationError::StateValidationError(format!(
                "Served patient {} still in dispatch queue",
                id
            )));
        }
    }

    // 2. Areas: integrity and capacity
    for area in &snapshot.areas {
        if area.queued.len() > area.capacity {
            return Err(SimulationError::StateValidationError(format!(
                "Area {} holds {} patients, capacity {}",
                area.name,
                area.queued.len(),
                area.capacity
            )));
        }
        for id in &area.queued {
            if !waiting.contains(id.as_str()) {
                return Err(SimulationError::StateValidationError(format!(
                    "Area {} queues unknown or served patient {}",
                    area.name, id
                )));
            }
        }
    }

    // 3. Served log uniqueness and status
    let mut seen = HashSet::new();
    for id in &snapshot.served {
        if !seen.insert(id.as_str()) {
            return Err(SimulationError::StateValidationError(format!(
                "Patient {} served more than once",
                id
            )));
        }
        let served_status = snapshot
            .patients
            .iter()
            .find(|p| p.id() == id)
            .map(Patient::status);
        if !matches!(served_status, Some(PatientStatus::Served { .. })) {
            return Err(SimulationError::StateValidationError(format!(
                "Served log entry {} is not marked served",
                id
            )));
        }
    }

    Ok(())
}
