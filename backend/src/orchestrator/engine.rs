//! Orchestrator Engine
//!
//! Drives one simulated day of the emergency department:
//! - Patient arrivals (from a pre-generated, ordered sequence)
//! - Time-driven service (one dispatch every N ticks)
//! - Load-driven overflow relief (extra dispatches when patients pile up)
//! - Wait-time statistics and SLA breach tracking
//! - Event logging (complete run history)
//!
//! # Architecture
//!
//! ```text
//! For each tick t in 0..ticks_per_day:
//! 1. Advance clock by units_per_tick
//! 2. Arrival rule:          t % arrival_interval == 0 and quota not reached → register next patient
//! 3. Scheduled service:     t % service_interval == 0 and queue non-empty   → dispatch one
//! 4. Overflow relief:       in_flight >= overflow_threshold and non-empty   → dispatch up to overflow_batch
//! ```
//!
//! The rules always run in this order; later rules see what earlier ones did
//! in the same tick.
//!
//! # Example
//!
//! ```rust
//! use triage_simulator_core_rs::arrivals::{GeneratorConfig, PatientGenerator};
//! use triage_simulator_core_rs::orchestrator::{Orchestrator, OrchestratorConfig};
//!
//! let patients = PatientGenerator::new(GeneratorConfig::default(), 12345)
//!     .unwrap()
//!     .generate();
//!
//! let mut orchestrator = Orchestrator::new(OrchestratorConfig::default(), patients).unwrap();
//! let report = orchestrator.run().unwrap();
//!
//! assert_eq!(report.ticks_executed, 1440);
//! assert_eq!(report.total_served, 142);
//! ```

use crate::core::time::SimClock;
use crate::models::area::AreaQueue;
use crate::models::event::{DispatchRule, Event, EventLog};
use crate::models::registry::HospitalRegistry;
use crate::models::triage_queue::QueueOrdering;
use crate::models::{Category, Patient};
use crate::orchestrator::metrics::{
    BreachRecord, BreachReport, SimulationReport, SlaPolicy, WaitStatistics, WaitingCount,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration Types
// ============================================================================

/// A care area created at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaConfig {
    pub name: String,
    pub capacity: usize,
}

impl AreaConfig {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Complete orchestrator configuration
///
/// Defaults reproduce the reference day: 1440 one-minute ticks of 60 units,
/// 144 patients, an arrival every 10 ticks and a scheduled service every 15.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Ticks in the simulated day
    pub ticks_per_day: usize,

    /// Clock units added per tick
    pub units_per_tick: u64,

    /// Maximum number of patients injected during the day
    pub daily_quota: usize,

    pub arrival_interval_ticks: usize,
    pub service_interval_ticks: usize,

    /// In-flight count at which overflow relief kicks in
    pub overflow_threshold: usize,

    /// Extra dispatches attempted per overflow relief
    pub overflow_batch: usize,

    pub sla: SlaPolicy,

    pub areas: Vec<AreaConfig>,

    /// Ordering used inside area queues (the global queue is always urgent-first)
    pub area_ordering: QueueOrdering,

    /// Re-rank queued patients when their category is reassigned
    pub reprioritize_on_reassign: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            ticks_per_day: 1440,
            units_per_tick: 60,
            daily_quota: 144,
            arrival_interval_ticks: 10,
            service_interval_ticks: 15,
            overflow_threshold: 3,
            overflow_batch: 2,
            sla: SlaPolicy::default(),
            areas: vec![
                AreaConfig::new("SAPU", 20),
                AreaConfig::new("urgencia_adulto", 20),
                AreaConfig::new("infantil", 20),
            ],
            area_ordering: QueueOrdering::UrgentFirst,
            reprioritize_on_reassign: true,
        }
    }
}

impl OrchestratorConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| {
            SimulationError::InvalidConfig(format!("Config parsing failed: {}", e))
        })
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        for (field, value) in [
            ("ticks_per_day", self.ticks_per_day),
            ("arrival_interval_ticks", self.arrival_interval_ticks),
            ("service_interval_ticks", self.service_interval_ticks),
            ("overflow_batch", self.overflow_batch),
        ] {
            if value == 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be > 0",
                    field
                )));
            }
        }

        if self.units_per_tick == 0 {
            return Err(SimulationError::InvalidConfig(
                "units_per_tick must be > 0".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for area in &self.areas {
            if area.name.is_empty() {
                return Err(SimulationError::InvalidConfig(
                    "Area name must not be empty".to_string(),
                ));
            }
            if !names.insert(area.name.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "Duplicate area: {}",
                    area.name
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Errors and results
// ============================================================================

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The engine seeds its clock from the first patient and cannot start without one
    #[error("Patient sequence is empty")]
    EmptyInput,

    #[error("Daily quota {quota} exceeds the {available} patients supplied")]
    InsufficientPatients { quota: usize, available: usize },

    #[error("Simulation already completed")]
    AlreadyCompleted,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("State validation error: {0}")]
    StateValidationError(String),
}

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    NotStarted,
    Running,
    Completed,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    pub tick: usize,

    /// Clock reading after the tick's advance
    pub clock: u64,

    /// Patient registered by the arrival rule, if any
    pub admitted: Option<String>,

    /// Patients dispatched this tick, in dispatch order
    pub dispatched: Vec<String>,

    pub in_flight: usize,
    pub waiting: usize,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator owning the registry, clock and statistics
///
/// # Determinism
///
/// The engine has no randomness of its own. The same patient sequence and
/// config always yield the same dispatch order and statistics.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: OrchestratorConfig,
    registry: HospitalRegistry,
    clock: SimClock,
    status: EngineStatus,

    /// Pre-generated patients not injected yet, in arrival order
    pending: VecDeque<Patient>,

    /// Patients injected so far (never exceeds `daily_quota`)
    injected: usize,

    /// Load counter driving overflow relief
    in_flight: usize,

    statistics: WaitStatistics,
    event_log: EventLog,
}

impl Orchestrator {
    /// Create new orchestrator from configuration and the day's patients
    ///
    /// # Errors
    ///
    /// * `EmptyInput` - no patients supplied (the clock starts at patient 0's arrival)
    /// * `InsufficientPatients` - fewer patients than the daily quota
    /// * `InvalidConfig` - configuration validation failed
    pub fn new(
        config: OrchestratorConfig,
        patients: Vec<Patient>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let start = patients
            .first()
            .map(Patient::arrival_time)
            .ok_or(SimulationError::EmptyInput)?;

        if config.daily_quota > patients.len() {
            return Err(SimulationError::InsufficientPatients {
                quota: config.daily_quota,
                available: patients.len(),
            });
        }

        let mut registry = HospitalRegistry::new()
            .with_reprioritize_on_reassign(config.reprioritize_on_reassign);
        for area in &config.areas {
            registry.add_area(AreaQueue::new(
                area.name.clone(),
                area.capacity,
                config.area_ordering,
            ));
        }

        let clock = SimClock::new(start, config.units_per_tick, config.ticks_per_day);

        Ok(Self {
            config,
            registry,
            clock,
            status: EngineStatus::NotStarted,
            pending: patients.into(),
            injected: 0,
            in_flight: 0,
            statistics: WaitStatistics::new(),
            event_log: EventLog::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Index of the next tick to execute
    pub fn current_tick(&self) -> usize {
        self.clock.ticks_elapsed()
    }

    /// Current clock reading in units
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &HospitalRegistry {
        &self.registry
    }

    pub fn statistics(&self) -> &WaitStatistics {
        &self.statistics
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn injected_count(&self) -> usize {
        self.injected
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ========================================================================
    // External mutation
    // ========================================================================

    /// Reassign a waiting patient's category between ticks
    ///
    /// Returns `false` for unknown or already served patients.
    pub fn reassign_category(&mut self, patient_id: &str, category: Category) -> bool {
        let Some(old_category) = self
            .registry
            .get_patient(patient_id)
            .map(Patient::category)
        else {
            return false;
        };

        if !self.registry.reassign_category(patient_id, category) {
            return false;
        }

        debug!(patient_id, %old_category, new_category = %category, "category reassigned");
        self.event_log.log(Event::CategoryReassigned {
            tick: self.current_tick(),
            patient_id: patient_id.to_string(),
            old_category,
            new_category: category,
        });
        true
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick
    ///
    /// # Errors
    ///
    /// `AlreadyCompleted` once the day's ticks have all run.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        match self.status {
            EngineStatus::Completed => return Err(SimulationError::AlreadyCompleted),
            EngineStatus::NotStarted => {
                info!(
                    ticks = self.config.ticks_per_day,
                    quota = self.config.daily_quota,
                    start = self.clock.now(),
                    "triage simulation started"
                );
                self.status = EngineStatus::Running;
            }
            EngineStatus::Running => {}
        }

        // STEP 1: CLOCK
        let tick = self.clock.advance_tick();

        // STEP 2-4: RULES (fixed order)
        let admitted = self.apply_arrival_rule(tick);
        let mut dispatched = Vec::new();
        self.apply_scheduled_service_rule(tick, &mut dispatched);
        self.apply_overflow_relief_rule(tick, &mut dispatched);

        if self.clock.is_day_complete() {
            self.finish(tick);
        }

        Ok(TickResult {
            tick,
            clock: self.clock.now(),
            admitted,
            dispatched,
            in_flight: self.in_flight,
            waiting: self.registry.waiting_count(),
        })
    }

    /// Run every remaining tick and return the report
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        if self.status == EngineStatus::Completed {
            return Err(SimulationError::AlreadyCompleted);
        }
        while self.status != EngineStatus::Completed {
            self.tick()?;
        }
        Ok(self.report())
    }

    fn apply_arrival_rule(&mut self, tick: usize) -> Option<String> {
        if tick % self.config.arrival_interval_ticks != 0
            || self.injected >= self.config.daily_quota
        {
            return None;
        }

        let patient = self.pending.pop_front()?;
        let patient_id = patient.id().to_string();
        let category = patient.category();
        let area = patient.area().to_string();

        let outcome = self.registry.register(patient);
        self.injected += 1;
        self.in_flight += 1;

        debug!(tick, patient_id = %patient_id, %category, area = %area, ?outcome, "patient arrived");
        self.event_log.log(Event::Arrival {
            tick,
            patient_id: patient_id.clone(),
            category,
            area: area.clone(),
        });
        self.event_log.log(Event::AreaAdmission {
            tick,
            patient_id: patient_id.clone(),
            area,
            outcome,
        });

        Some(patient_id)
    }

    fn apply_scheduled_service_rule(&mut self, tick: usize, dispatched: &mut Vec<String>) {
        if tick % self.config.service_interval_ticks != 0 || !self.registry.has_waiting() {
            return;
        }

        dispatched.extend(self.dispatch_and_record(tick, DispatchRule::Scheduled));
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn apply_overflow_relief_rule(&mut self, tick: usize, dispatched: &mut Vec<String>) {
        if self.in_flight < self.config.overflow_threshold || !self.registry.has_waiting() {
            return;
        }

        for _ in 0..self.config.overflow_batch {
            if self.registry.has_waiting() {
                dispatched.extend(self.dispatch_and_record(tick, DispatchRule::OverflowRelief));
            }
        }
        self.in_flight = self.in_flight.saturating_sub(self.config.overflow_batch);
    }

    /// Dispatch the next patient and record its wait and SLA outcome
    fn dispatch_and_record(&mut self, tick: usize, rule: DispatchRule) -> Option<String> {
        let now = self.clock.now();
        let patient = self.registry.dispatch_next(now)?;

        let patient_id = patient.id().to_string();
        let category = patient.category();
        let arrival_time = patient.arrival_time();
        let wait_minutes = patient.current_wait(now);

        self.statistics.record_wait(category, wait_minutes);
        debug!(tick, patient_id = %patient_id, %category, wait_minutes, ?rule, "patient dispatched");
        self.event_log.log(Event::Dispatch {
            tick,
            patient_id: patient_id.clone(),
            category,
            wait_minutes,
            rule,
        });

        if self.config.sla.is_breach(category, wait_minutes) {
            let limit_minutes = self.config.sla.max_wait(category).unwrap_or_default();
            warn!(tick, patient_id = %patient_id, %category, wait_minutes, limit_minutes, "SLA breached");
            self.statistics.record_breach(BreachRecord {
                patient_id: patient_id.clone(),
                category,
                wait_minutes,
                limit_minutes,
                arrival_time,
            });
            self.event_log.log(Event::SlaBreach {
                tick,
                patient_id: patient_id.clone(),
                category,
                wait_minutes,
                limit_minutes,
            });
        }

        Some(patient_id)
    }

    fn finish(&mut self, tick: usize) {
        self.status = EngineStatus::Completed;
        let total_served = self.registry.total_served();
        let still_waiting = self.registry.waiting_count();

        info!(
            total_served,
            still_waiting,
            breaches = self.statistics.breaches().len(),
            "triage simulation completed"
        );
        self.event_log.log(Event::SimulationCompleted {
            tick,
            total_served,
            still_waiting,
        });
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Aggregate statistics as of the current clock reading
    pub fn report(&self) -> SimulationReport {
        let clock_at_close = self.clock.now();

        SimulationReport {
            ticks_executed: self.clock.ticks_elapsed(),
            total_served: self.registry.total_served(),
            still_waiting: self.registry.waiting_count(),
            categories: self.statistics.summarize(),
            breaches: self
                .statistics
                .breaches()
                .iter()
                .map(|record| BreachReport::from_record(record, clock_at_close))
                .collect(),
            waiting_by_category: Category::ALL
                .iter()
                .map(|&category| WaitingCount {
                    category,
                    waiting: self.registry.patients_by_category(category).len(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn patients(categories: &[Category]) -> Vec<Patient> {
        categories
            .iter()
            .enumerate()
            .map(|(i, &category)| {
                Patient::new(
                    "Ana",
                    "Soto",
                    format!("P{}", 1000 + i),
                    category,
                    i as u64 * 600,
                    "SAPU",
                )
            })
            .collect()
    }

    fn config_with_quota(quota: usize) -> OrchestratorConfig {
        OrchestratorConfig {
            daily_quota: quota,
            ..OrchestratorConfig::default()
        }
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator =
            Orchestrator::new(config_with_quota(1), patients(&[Category::C3])).unwrap();

        assert_eq!(orchestrator.current_tick(), 0);
        assert_eq!(orchestrator.status(), EngineStatus::NotStarted);
        assert_eq!(orchestrator.registry().areas().count(), 3);
        assert!(orchestrator.event_log().is_empty());
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = Orchestrator::new(config_with_quota(0), vec![]);
        assert_eq!(result.unwrap_err(), SimulationError::EmptyInput);
    }

    #[test]
    fn test_quota_larger_than_input_rejected() {
        let result = Orchestrator::new(config_with_quota(3), patients(&[Category::C1]));
        assert_eq!(
            result.unwrap_err(),
            SimulationError::InsufficientPatients {
                quota: 3,
                available: 1
            }
        );
    }

    #[test]
    fn test_validate_config_zero_intervals() {
        let config = OrchestratorConfig {
            service_interval_ticks: 0,
            ..OrchestratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_config_duplicate_areas() {
        let config = OrchestratorConfig {
            areas: vec![AreaConfig::new("SAPU", 1), AreaConfig::new("SAPU", 2)],
            ..OrchestratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_first_tick_admits_and_serves() {
        let mut orchestrator =
            Orchestrator::new(config_with_quota(1), patients(&[Category::C2])).unwrap();

        let result = orchestrator.tick().unwrap();

        assert_eq!(result.tick, 0);
        assert_eq!(result.clock, 60);
        assert_eq!(result.admitted.as_deref(), Some("P1000"));
        assert_eq!(result.dispatched, vec!["P1000".to_string()]);
        assert_eq!(result.in_flight, 0);
        assert_eq!(orchestrator.statistics().waits(Category::C2), &[1]);
        assert_eq!(orchestrator.status(), EngineStatus::Running);
    }

    #[test]
    fn test_first_tick_c1_breaches() {
        let mut orchestrator =
            Orchestrator::new(config_with_quota(1), patients(&[Category::C1])).unwrap();
        orchestrator.tick().unwrap();

        let breaches = orchestrator.statistics().breaches();
        assert_eq!(breaches.len(), 1);
        assert_eq!(breaches[0].patient_id, "P1000");
        assert_eq!(breaches[0].wait_minutes, 1);
    }

    #[test]
    fn test_tick_after_completion_fails() {
        let config = OrchestratorConfig {
            ticks_per_day: 2,
            daily_quota: 0,
            ..OrchestratorConfig::default()
        };
        let mut orchestrator = Orchestrator::new(config, patients(&[Category::C1])).unwrap();

        orchestrator.tick().unwrap();
        orchestrator.tick().unwrap();
        assert_eq!(orchestrator.status(), EngineStatus::Completed);
        assert_eq!(orchestrator.tick(), Err(SimulationError::AlreadyCompleted));
        assert_eq!(orchestrator.run(), Err(SimulationError::AlreadyCompleted));
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config = OrchestratorConfig::from_json_str(r#"{"daily_quota": 12}"#).unwrap();
        assert_eq!(config.daily_quota, 12);
        assert_eq!(config.ticks_per_day, 1440);
        assert_eq!(config.areas.len(), 3);

        assert!(OrchestratorConfig::from_json_str("not json").is_err());
    }
}
