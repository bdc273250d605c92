//! Wait-time statistics, SLA classification and the end-of-run report.

use crate::core::time::units_to_minutes;
use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum tolerated wait per category, in minutes
///
/// `None` means the category never breaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaPolicy {
    pub max_wait_minutes: [Option<u64>; 5],
}

impl SlaPolicy {
    /// Tolerated wait for a category
    pub fn max_wait(&self, category: Category) -> Option<u64> {
        self.max_wait_minutes[category.index()]
    }

    /// Whether waiting `wait_minutes` breaches the category's limit
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::orchestrator::SlaPolicy;
    /// use triage_simulator_core_rs::Category;
    ///
    /// let sla = SlaPolicy::default();
    /// assert!(!sla.is_breach(Category::C4, 180));
    /// assert!(sla.is_breach(Category::C4, 181));
    /// assert!(!sla.is_breach(Category::C5, 10_000));
    /// ```
    pub fn is_breach(&self, category: Category, wait_minutes: u64) -> bool {
        self.max_wait(category)
            .is_some_and(|limit| wait_minutes > limit)
    }
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            max_wait_minutes: [Some(0), Some(30), Some(90), Some(180), None],
        }
    }
}

/// A dispatched patient that waited past its category's limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    pub patient_id: String,
    pub category: Category,
    /// Wait at dispatch time
    pub wait_minutes: u64,
    pub limit_minutes: u64,
    pub arrival_time: u64,
}

/// Per-category wait statistics collected during a run
///
/// Append-only; a fresh instance is created with each engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitStatistics {
    waits: BTreeMap<Category, Vec<u64>>,
    worst: BTreeMap<Category, u64>,
    breaches: Vec<BreachRecord>,
}

impl WaitStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dispatch wait and update the running worst
    pub fn record_wait(&mut self, category: Category, wait_minutes: u64) {
        self.waits.entry(category).or_default().push(wait_minutes);
        let worst = self.worst.entry(category).or_insert(0);
        *worst = (*worst).max(wait_minutes);
    }

    pub fn record_breach(&mut self, breach: BreachRecord) {
        self.breaches.push(breach);
    }

    /// Recorded waits for a category, in dispatch order
    pub fn waits(&self, category: Category) -> &[u64] {
        self.waits.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Worst wait for a category (0 when nobody was served)
    pub fn worst_wait(&self, category: Category) -> u64 {
        self.worst.get(&category).copied().unwrap_or(0)
    }

    /// Average wait for a category (0.0 when nobody was served)
    pub fn average_wait(&self, category: Category) -> f64 {
        let waits = self.waits(category);
        if waits.is_empty() {
            return 0.0;
        }
        waits.iter().sum::<u64>() as f64 / waits.len() as f64
    }

    pub fn served_count(&self, category: Category) -> usize {
        self.waits(category).len()
    }

    pub fn total_recorded(&self) -> usize {
        self.waits.values().map(Vec::len).sum()
    }

    pub fn breaches(&self) -> &[BreachRecord] {
        &self.breaches
    }

    /// One summary row per category, C1 first
    pub fn summarize(&self) -> Vec<CategorySummary> {
        Category::ALL
            .iter()
            .map(|&category| CategorySummary {
                category,
                average_wait: self.average_wait(category),
                worst_wait: self.worst_wait(category),
                served: self.served_count(category),
            })
            .collect()
    }
}

/// Aggregated statistics for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub average_wait: f64,
    pub worst_wait: u64,
    pub served: usize,
}

/// Breach entry as presented to report consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachReport {
    pub patient_id: String,
    pub category: Category,
    /// Wait measured when the patient was dispatched
    pub wait_minutes: u64,
    /// Minutes from arrival to the clock reading at report time
    pub elapsed_at_close_minutes: u64,
}

impl BreachReport {
    pub fn from_record(record: &BreachRecord, clock_at_close: u64) -> Self {
        Self {
            patient_id: record.patient_id.clone(),
            category: record.category,
            wait_minutes: record.wait_minutes,
            elapsed_at_close_minutes: units_to_minutes(
                clock_at_close.saturating_sub(record.arrival_time),
            ),
        }
    }
}

/// Waiting patients left in the dispatch queue for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingCount {
    pub category: Category,
    pub waiting: usize,
}

/// Everything the reporting side consumes after a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub ticks_executed: usize,
    pub total_served: usize,
    pub still_waiting: usize,
    pub categories: Vec<CategorySummary>,
    pub breaches: Vec<BreachReport>,
    pub waiting_by_category: Vec<WaitingCount>,
}

impl SimulationReport {
    pub fn summary_for(&self, category: Category) -> Option<&CategorySummary> {
        self.categories.iter().find(|s| s.category == category)
    }
}
