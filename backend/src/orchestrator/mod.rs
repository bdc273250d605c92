//! Orchestrator - main simulation loop
//!
//! Runs the tick-driven admission/service day and aggregates its statistics.
//! See `engine.rs` for the tick loop and `metrics.rs` for the SLA and report types.

pub mod checkpoint;
pub mod engine;
pub mod metrics;

// Re-export main types for convenience
pub use engine::{
    AreaConfig, EngineStatus, Orchestrator, OrchestratorConfig, SimulationError, TickResult,
};
pub use metrics::{
    BreachRecord, BreachReport, CategorySummary, SimulationReport, SlaPolicy, WaitStatistics,
    WaitingCount,
};

// Re-export snapshot types
pub use checkpoint::{compute_config_hash, validate_snapshot, AreaSnapshot, StateSnapshot};
