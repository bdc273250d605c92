//! Patient model
//!
//! A patient carries immutable identity (names, id, arrival time, area label)
//! plus mutable triage state: category, status and a LIFO change log.
//!
//! The category is the ranking key. Anything that changes it while the
//! patient sits in a queue must re-rank that queue (see
//! [`crate::models::registry::HospitalRegistry::reassign_category`]).

use crate::core::time::units_to_minutes;
use crate::models::category::Category;
use serde::{Deserialize, Serialize};

/// Patient lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    /// Registered and waiting to be dispatched
    Waiting,

    /// Dispatched (terminal)
    Served {
        /// Clock reading when the patient was dispatched
        at: u64,
    },
}

/// Emergency patient record
///
/// # Example
/// ```
/// use triage_simulator_core_rs::{Category, Patient};
///
/// let mut patient = Patient::new("Ana", "Soto", "P1000", Category::C2, 600, "SAPU");
/// assert_eq!(patient.current_wait(600 + 1800), 30);
///
/// patient.record_change("Category reassigned to C1");
/// assert_eq!(patient.pop_last_change().as_deref(), Some("Category reassigned to C1"));
/// assert_eq!(patient.pop_last_change(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    given_name: String,
    family_name: String,
    id: String,
    category: Category,
    /// Clock reading (units) at arrival
    arrival_time: u64,
    status: PatientStatus,
    area: String,
    /// Change descriptions, most recent last
    change_log: Vec<String>,
}

impl Patient {
    /// Create a waiting patient
    pub fn new(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        id: impl Into<String>,
        category: Category,
        arrival_time: u64,
        area: impl Into<String>,
    ) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
            id: id.into(),
            category,
            arrival_time,
            status: PatientStatus::Waiting,
            area: area.into(),
            change_log: Vec::new(),
        }
    }

    /// Elapsed wait in whole minutes at clock reading `now`
    ///
    /// A clock reading before arrival counts as zero wait.
    pub fn current_wait(&self, now: u64) -> u64 {
        units_to_minutes(now.saturating_sub(self.arrival_time))
    }

    /// Push a change description onto the log
    pub fn record_change(&mut self, description: impl Into<String>) {
        self.change_log.push(description.into());
    }

    /// Remove and return the most recent change, `None` when nothing is logged
    pub fn pop_last_change(&mut self) -> Option<String> {
        self.change_log.pop()
    }

    /// Prepend another record's change history to this one's
    pub(crate) fn carry_change_log(&mut self, previous: Patient) {
        let mut log = previous.change_log;
        log.append(&mut self.change_log);
        self.change_log = log;
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_status(&mut self, status: PatientStatus) {
        self.status = status;
    }

    /// Mark as served at clock reading `at`
    pub fn mark_served(&mut self, at: u64) {
        self.status = PatientStatus::Served { at };
    }

    pub fn is_waiting(&self) -> bool {
        self.status == PatientStatus::Waiting
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// "Given Family"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn status(&self) -> PatientStatus {
        self.status
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    /// Logged changes, oldest first
    pub fn change_log(&self) -> &[String] {
        &self.change_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> Patient {
        Patient::new("Juan", "Pérez", "P1000", Category::C3, 1200, "infantil")
    }

    #[test]
    fn test_new_patient_is_waiting() {
        let p = patient();
        assert!(p.is_waiting());
        assert_eq!(p.status(), PatientStatus::Waiting);
        assert!(p.change_log().is_empty());
        assert_eq!(p.full_name(), "Juan Pérez");
    }

    #[test]
    fn test_wait_before_arrival_is_zero() {
        assert_eq!(patient().current_wait(0), 0);
    }

    #[test]
    fn test_change_log_is_lifo() {
        let mut p = patient();
        p.record_change("first");
        p.record_change("second");
        assert_eq!(p.pop_last_change().as_deref(), Some("second"));
        assert_eq!(p.pop_last_change().as_deref(), Some("first"));
        assert_eq!(p.pop_last_change(), None);
    }

    #[test]
    fn test_mark_served() {
        let mut p = patient();
        p.mark_served(4200);
        assert!(!p.is_waiting());
        assert_eq!(p.status(), PatientStatus::Served { at: 4200 });
    }
}
