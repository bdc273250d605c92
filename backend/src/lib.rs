//! Triage Simulator Core - Rust Engine
//!
//! Deterministic simulation of an emergency-department triage queue over one
//! synthetic day.
//!
//! # Architecture
//!
//! - **core**: Tick clock
//! - **models**: Domain types (Patient, Category, queues, HospitalRegistry, events)
//! - **arrivals**: Seeded patient generation
//! - **orchestrator**: Tick loop, SLA statistics, reports and snapshots
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Categories are always within C1..C5 (enforced by [`Category`])
//! 2. All randomness is deterministic (seeded RNG)
//! 3. A patient is served at most once and never waits again afterwards

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{CategoryDistribution, GeneratorConfig, PatientGenerator};
pub use core::time::SimClock;
pub use models::{
    area::{AdmissionOutcome, AreaQueue},
    category::{Category, PatientError},
    event::{Event, EventLog},
    patient::{Patient, PatientStatus},
    registry::HospitalRegistry,
};
pub use orchestrator::{
    AreaConfig, EngineStatus, Orchestrator, OrchestratorConfig, SimulationError,
    SimulationReport, SlaPolicy, TickResult,
};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn triage_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyOrchestrator>()?;
    Ok(())
}
