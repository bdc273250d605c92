//! Patient arrival generation.
//!
//! Produces the finite, ordered patient sequence the engine consumes. All
//! draws go through [`RngManager`], so the same seed and config always yield
//! the same day.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same patients
//! 2. **Fixed spacing**: patient `i` arrives at `start_time + i * interval_units`
//! 3. **Discrete categories**: category drawn from a percentage table
//!
//! # Example
//!
//! ```
//! use triage_simulator_core_rs::arrivals::{GeneratorConfig, PatientGenerator};
//!
//! let config = GeneratorConfig { count: 3, ..GeneratorConfig::default() };
//! let patients = PatientGenerator::new(config, 42).unwrap().generate();
//!
//! assert_eq!(patients.len(), 3);
//! assert_eq!(patients[0].id(), "P1000");
//! assert_eq!(patients[2].arrival_time(), 1200);
//! ```

use crate::models::{Category, Patient};
use crate::orchestrator::SimulationError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Category sampling table as percentages for C1..C5
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub percentages: [u8; 5],
}

impl CategoryDistribution {
    /// Build a table; the percentages must add up to 100
    pub fn new(percentages: [u8; 5]) -> Result<Self, SimulationError> {
        let distribution = Self { percentages };
        distribution.validate()?;
        Ok(distribution)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let total: u32 = self.percentages.iter().map(|&p| p as u32).sum();
        if total != 100 {
            return Err(SimulationError::InvalidConfig(format!(
                "category percentages must sum to 100, got {}",
                total
            )));
        }
        Ok(())
    }

    /// Cumulative upper bounds, e.g. `[10, 25, 43, 70, 100]` for the default table
    pub fn cumulative_thresholds(&self) -> [u8; 5] {
        let mut running = 0u8;
        let mut thresholds = [0u8; 5];
        for (slot, &p) in thresholds.iter_mut().zip(self.percentages.iter()) {
            running = running.saturating_add(p);
            *slot = running;
        }
        thresholds
    }

    /// Map a percentile draw in [0, 100) to a category
    pub fn category_for(&self, percentile: u8) -> Category {
        self.cumulative_thresholds()
            .iter()
            .position(|&threshold| percentile < threshold)
            .map(|idx| Category::ALL[idx])
            .unwrap_or(Category::C5)
    }
}

impl Default for CategoryDistribution {
    fn default() -> Self {
        Self {
            percentages: [10, 15, 18, 27, 30],
        }
    }
}

/// Configuration of a generated patient day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of patients to produce
    pub count: usize,

    /// Clock reading (units) of the first arrival
    pub start_time: u64,

    /// Clock units between consecutive arrivals
    pub interval_units: u64,

    /// Identifier prefix; ids are `{prefix}{id_offset + i}`
    pub id_prefix: String,
    pub id_offset: usize,

    pub category_distribution: CategoryDistribution,

    pub given_names: Vec<String>,
    pub family_names: Vec<String>,

    /// Care area labels patients are spread across
    pub areas: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| -> Vec<String> { names.iter().map(|s| s.to_string()).collect() };
        Self {
            count: 144,
            start_time: 0,
            interval_units: 600,
            id_prefix: "P".to_string(),
            id_offset: 1000,
            category_distribution: CategoryDistribution::default(),
            given_names: owned(&["Juan", "Ana", "Luis", "Pedro", "Camila"]),
            family_names: owned(&["Pérez", "Soto", "González", "Rojas", "López"]),
            areas: owned(&["SAPU", "urgencia_adulto", "infantil"]),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.category_distribution.validate()?;
        for (field, pool) in [
            ("given_names", &self.given_names),
            ("family_names", &self.family_names),
            ("areas", &self.areas),
        ] {
            if pool.is_empty() {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Deterministic generator of patient sequences
#[derive(Debug, Clone)]
pub struct PatientGenerator {
    config: GeneratorConfig,
    rng: RngManager,
}

impl PatientGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: RngManager::new(seed),
        })
    }

    /// Generate the configured number of patients in arrival order
    ///
    /// Per patient the draws are: given name, family name, category, area.
    pub fn generate(&mut self) -> Vec<Patient> {
        (0..self.config.count).map(|i| self.generate_one(i)).collect()
    }

    fn generate_one(&mut self, position: usize) -> Patient {
        let cfg = &self.config;
        let given = &cfg.given_names[self.rng.index(cfg.given_names.len())];
        let family = &cfg.family_names[self.rng.index(cfg.family_names.len())];
        let category = cfg.category_distribution.category_for(self.rng.percentile());
        let area = &cfg.areas[self.rng.index(cfg.areas.len())];

        let id = format!("{}{}", cfg.id_prefix, cfg.id_offset + position);
        let arrival_time = cfg.start_time + position as u64 * cfg.interval_units;

        Patient::new(given.as_str(), family.as_str(), id, category, arrival_time, area.as_str())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
