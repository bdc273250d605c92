//! PyO3 wrapper for Orchestrator
//!
//! # Example (from Python)
//!
//! ```python
//! from triage_simulator_core_rs import Orchestrator
//!
//! orch = Orchestrator.new({"daily_quota": 144}, {"count": 144, "start_time": 0}, 12345)
//! report = orch.run()
//! print(report["total_served"])
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_generator_config, parse_orchestrator_config, report_to_py, tick_result_to_py};
use crate::arrivals::PatientGenerator;
use crate::models::Category;
use crate::orchestrator::Orchestrator as RustOrchestrator;

/// Python wrapper for Rust Orchestrator
#[pyclass(name = "Orchestrator")]
pub struct PyOrchestrator {
    inner: RustOrchestrator,
}

#[pymethods]
impl PyOrchestrator {
    /// Generate a patient day from `generator` + `seed` and build the engine
    ///
    /// Raises ValueError for invalid configuration or an empty patient day.
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>, generator: &Bound<'_, PyDict>, seed: u64) -> PyResult<Self> {
        let engine_config = parse_orchestrator_config(config)?;
        let generator_config = parse_generator_config(generator)?;

        let patients = PatientGenerator::new(generator_config, seed)
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .generate();

        let inner = RustOrchestrator::new(engine_config, patients)
            .map_err(|e| PyValueError::new_err(format!("Failed to create orchestrator: {}", e)))?;

        Ok(PyOrchestrator { inner })
    }

    /// Execute one tick and return its result dict
    fn tick(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let result = self
            .inner
            .tick()
            .map_err(|e| PyRuntimeError::new_err(format!("Tick execution failed: {}", e)))?;
        tick_result_to_py(py, &result)
    }

    /// Run the remaining ticks and return the report dict
    fn run(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let report = self
            .inner
            .run()
            .map_err(|e| PyRuntimeError::new_err(format!("Simulation failed: {}", e)))?;
        report_to_py(py, &report)
    }

    /// Report as of the current tick
    fn report(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        report_to_py(py, &self.inner.report())
    }

    fn current_tick(&self) -> usize {
        self.inner.current_tick()
    }

    /// Reassign a waiting patient's category (1-5)
    fn reassign_category(&mut self, patient_id: &str, level: u8) -> PyResult<bool> {
        let category = Category::new(level).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(self.inner.reassign_category(patient_id, category))
    }

    /// Snapshot of the current state as JSON
    fn snapshot_json(&self) -> PyResult<String> {
        self.inner
            .snapshot()
            .and_then(|snapshot| snapshot.to_json())
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}
