//! Python bindings (PyO3)
//!
//! Exposes the orchestrator as `triage_simulator_core_rs.Orchestrator`.

pub mod orchestrator;
pub mod types;
