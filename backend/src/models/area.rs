//! Care area queue
//!
//! A bounded, per-location priority queue. Admission into a saturated area
//! is dropped at the area level only; the patient stays registered with the
//! hospital and can still be dispatched from the global queue.

use crate::models::category::Category;
use crate::models::patient::Patient;
use crate::models::triage_queue::{QueueOrdering, TriageQueue};
use serde::{Deserialize, Serialize};

/// Result of routing a patient into an area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionOutcome {
    /// Patient is now queued in the area
    Admitted,
    /// Area was at capacity; admission dropped
    Saturated,
    /// No area is configured under the patient's label
    UnknownArea,
    /// Patient id was already served; registration ignored
    AlreadyServed,
}

/// Bounded priority queue for one care area
///
/// # Example
/// ```
/// use triage_simulator_core_rs::models::area::{AdmissionOutcome, AreaQueue};
/// use triage_simulator_core_rs::models::triage_queue::QueueOrdering;
/// use triage_simulator_core_rs::{Category, Patient};
///
/// let mut area = AreaQueue::new("SAPU", 1, QueueOrdering::UrgentFirst);
/// let first = Patient::new("Ana", "Soto", "P1000", Category::C3, 0, "SAPU");
/// let second = Patient::new("Luis", "Rojas", "P1001", Category::C1, 600, "SAPU");
///
/// assert_eq!(area.admit(&first), AdmissionOutcome::Admitted);
/// assert_eq!(area.admit(&second), AdmissionOutcome::Saturated);
/// assert_eq!(area.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AreaQueue {
    name: String,
    capacity: usize,
    queue: TriageQueue,
}

impl AreaQueue {
    pub fn new(name: impl Into<String>, capacity: usize, ordering: QueueOrdering) -> Self {
        Self {
            name: name.into(),
            capacity,
            queue: TriageQueue::new(ordering),
        }
    }

    /// True once the area holds `capacity` patients
    pub fn is_saturated(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    /// Queue the patient unless the area is saturated
    ///
    /// A patient already queued here is re-ranked instead of counted twice.
    pub fn admit(&mut self, patient: &Patient) -> AdmissionOutcome {
        if !self.queue.contains(patient.id()) && self.is_saturated() {
            return AdmissionOutcome::Saturated;
        }
        self.queue
            .push(patient.id(), patient.category(), patient.arrival_time());
        AdmissionOutcome::Admitted
    }

    /// Remove and return the id at the head of the area queue
    pub fn dispatch_next(&mut self) -> Option<String> {
        self.queue.pop()
    }

    /// Remove a specific patient regardless of position
    pub fn remove(&mut self, id: &str) -> bool {
        self.queue.remove(id)
    }

    /// Re-rank the patient under its current category if it is queued here
    pub fn reprioritize(&mut self, patient: &Patient) -> bool {
        self.queue.reprioritize(patient.id(), patient.category())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.queue.contains(id)
    }

    /// Category the patient is currently ranked under in this area
    pub fn queued_category(&self, id: &str) -> Option<Category> {
        self.queue.queued_category(id)
    }

    /// Queued ids in area dispatch order
    pub fn queued_ids(&self) -> impl Iterator<Item = &str> {
        self.queue.iter()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn ordering(&self) -> QueueOrdering {
        self.queue.ordering()
    }
}
