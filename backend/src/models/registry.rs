//! Hospital Registry
//!
//! Owns every patient record and the queues that reference them:
//! - the global dispatch queue spanning all areas (unbounded)
//! - one bounded [`AreaQueue`] per configured care area
//! - the append-only served log
//!
//! # Critical Invariants
//!
//! 1. **Queue Validity**: every id in the dispatch queue or an area queue exists in `patients`
//! 2. **Single Service**: an id appears in `served` at most once, and only after it left every queue
//! 3. **No Duplicates**: a patient is queued at most once per queue (re-registration re-ranks)

use crate::models::area::{AdmissionOutcome, AreaQueue};
use crate::models::category::Category;
use crate::models::patient::{Patient, PatientStatus};
use crate::models::triage_queue::{QueueOrdering, TriageQueue};
use std::collections::{BTreeMap, HashMap};

/// Registry of all patients plus dispatch and area queues
///
/// # Example
///
/// ```rust
/// use triage_simulator_core_rs::{Category, HospitalRegistry, Patient};
///
/// let mut registry = HospitalRegistry::new();
/// registry.register(Patient::new("Ana", "Soto", "P1000", Category::C4, 0, "SAPU"));
/// registry.register(Patient::new("Luis", "Rojas", "P1001", Category::C2, 600, "SAPU"));
///
/// let served = registry.dispatch_next(1200).unwrap();
/// assert_eq!(served.id(), "P1001");
/// assert_eq!(registry.total_served(), 1);
/// assert_eq!(registry.waiting_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HospitalRegistry {
    /// Canonical patient records, indexed by id
    patients: HashMap<String, Patient>,

    /// Global dispatch queue (urgent-first)
    dispatch_queue: TriageQueue,

    /// Care areas by name
    areas: BTreeMap<String, AreaQueue>,

    /// Served patient ids in dispatch order
    served: Vec<String>,

    /// Re-rank queues when a category is reassigned
    reprioritize_on_reassign: bool,
}

impl HospitalRegistry {
    /// Empty registry with no areas, re-ranking on reassignment
    pub fn new() -> Self {
        Self {
            patients: HashMap::new(),
            dispatch_queue: TriageQueue::new(QueueOrdering::UrgentFirst),
            areas: BTreeMap::new(),
            served: Vec::new(),
            reprioritize_on_reassign: true,
        }
    }

    /// Keep the dispatch queue's ranking stale after reassignment
    ///
    /// With `false`, a reassigned patient keeps its old rank in every queue
    /// until it is dispatched. Statistics still read the new category.
    pub fn with_reprioritize_on_reassign(mut self, enabled: bool) -> Self {
        self.reprioritize_on_reassign = enabled;
        self
    }

    /// Add (or replace) a care area
    pub fn add_area(&mut self, area: AreaQueue) {
        self.areas.insert(area.name().to_string(), area);
    }

    /// Register a patient as waiting
    ///
    /// Adds the record to the index and the dispatch queue, then routes it
    /// into the area named by its label. Registering an id that is still
    /// waiting replaces the record, keeps its change log and re-ranks the
    /// existing queue entries, moving it out of its old area if the label
    /// changed. An id that was already served is ignored.
    pub fn register(&mut self, mut patient: Patient) -> AdmissionOutcome {
        let id = patient.id().to_string();
        if let Some(previous) = self.patients.remove(&id) {
            if !previous.is_waiting() {
                self.patients.insert(id, previous);
                return AdmissionOutcome::AlreadyServed;
            }
            if previous.area() != patient.area() {
                if let Some(old_area) = self.areas.get_mut(previous.area()) {
                    old_area.remove(&id);
                }
            }
            patient.carry_change_log(previous);
        }
        patient.set_status(PatientStatus::Waiting);

        self.dispatch_queue
            .push(id.clone(), patient.category(), patient.arrival_time());

        let outcome = match self.areas.get_mut(patient.area()) {
            Some(area) => area.admit(&patient),
            None => AdmissionOutcome::UnknownArea,
        };
        if outcome == AdmissionOutcome::Saturated {
            tracing::debug!(patient_id = %id, area = %patient.area(), "area saturated, admission dropped");
        }

        self.patients.insert(id, patient);
        outcome
    }

    /// Change a waiting patient's category and log the change
    ///
    /// Returns `false` without side effects for unknown or served patients.
    pub fn reassign_category(&mut self, id: &str, category: Category) -> bool {
        let Some(patient) = self.patients.get_mut(id) else {
            return false;
        };
        if !patient.is_waiting() {
            return false;
        }

        patient.set_category(category);
        patient.record_change(format!("Category reassigned to {}", category));

        if self.reprioritize_on_reassign {
            self.dispatch_queue.reprioritize(id, category);
            if let Some(area) = self.areas.get_mut(patient.area()) {
                area.reprioritize(patient);
            }
        }
        true
    }

    /// Re-rank a queued patient under its current category in every queue
    pub fn reprioritize(&mut self, id: &str) -> bool {
        let Some(patient) = self.patients.get(id) else {
            return false;
        };
        let moved = self.dispatch_queue.reprioritize(id, patient.category());
        if let Some(area) = self.areas.get_mut(patient.area()) {
            area.reprioritize(patient);
        }
        moved
    }

    /// Dispatch the highest-priority patient from the global queue
    ///
    /// Marks it served at clock reading `now`, removes it from its area queue
    /// and appends it to the served log.
    pub fn dispatch_next(&mut self, now: u64) -> Option<&Patient> {
        let id = self.dispatch_queue.pop()?;
        self.complete_dispatch(id, now)
    }

    /// Dispatch the head of one area's queue
    ///
    /// The patient also leaves the global queue. `None` if the area is
    /// unknown or empty.
    pub fn dispatch_from_area(&mut self, area: &str, now: u64) -> Option<&Patient> {
        let id = self.areas.get_mut(area)?.dispatch_next()?;
        self.dispatch_queue.remove(&id);
        self.complete_dispatch(id, now)
    }

    fn complete_dispatch(&mut self, id: String, now: u64) -> Option<&Patient> {
        let patient = self.patients.get_mut(&id)?;
        if !patient.is_waiting() {
            return None;
        }
        if let Some(area) = self.areas.get_mut(patient.area()) {
            area.remove(&id);
        }
        patient.mark_served(now);
        self.served.push(id);
        Some(&*patient)
    }

    /// Waiting patients (dispatch queue) with the given category, in dispatch order
    pub fn patients_by_category(&self, category: Category) -> Vec<&Patient> {
        self.dispatch_queue
            .iter()
            .filter_map(|id| self.patients.get(id))
            .filter(|patient| patient.category() == category)
            .collect()
    }

    /// Pop the most recent change for a patient
    pub fn pop_last_change(&mut self, id: &str) -> Option<String> {
        self.patients.get_mut(id)?.pop_last_change()
    }

    pub fn get_patient(&self, id: &str) -> Option<&Patient> {
        self.patients.get(id)
    }

    pub fn patients(&self) -> &HashMap<String, Patient> {
        &self.patients
    }

    pub fn area(&self, name: &str) -> Option<&AreaQueue> {
        self.areas.get(name)
    }

    pub fn areas(&self) -> impl Iterator<Item = &AreaQueue> {
        self.areas.values()
    }

    pub fn dispatch_queue(&self) -> &TriageQueue {
        &self.dispatch_queue
    }

    /// Served patient ids in dispatch order
    pub fn served_ids(&self) -> &[String] {
        &self.served
    }

    /// Served patients in dispatch order
    pub fn served(&self) -> impl Iterator<Item = &Patient> {
        self.served.iter().filter_map(|id| self.patients.get(id))
    }

    pub fn total_served(&self) -> usize {
        self.served.len()
    }

    /// Patients still in the dispatch queue
    pub fn waiting_count(&self) -> usize {
        self.dispatch_queue.len()
    }

    pub fn has_waiting(&self) -> bool {
        !self.dispatch_queue.is_empty()
    }

    pub fn num_patients(&self) -> usize {
        self.patients.len()
    }
}

impl Default for HospitalRegistry {
    fn default() -> Self {
        Self::new()
    }
}
