//! Event logging for simulation replay and auditing.
//!
//! Every significant state change during a run is recorded as an [`Event`]:
//! - **Arrival**: patient registered with the hospital
//! - **AreaAdmission**: outcome of routing the patient into its care area
//! - **Dispatch**: patient served by a scheduling rule
//! - **SlaBreach**: served patient waited longer than its category allows
//! - **CategoryReassigned**: triage category changed while waiting
//! - **SimulationCompleted**: the day's last tick finished
//!
//! # Example
//!
//! ```rust
//! use triage_simulator_core_rs::models::event::{DispatchRule, Event, EventLog};
//! use triage_simulator_core_rs::Category;
//!
//! let mut log = EventLog::new();
//! log.log(Event::Dispatch {
//!     tick: 15,
//!     patient_id: "P1001".to_string(),
//!     category: Category::C2,
//!     wait_minutes: 6,
//!     rule: DispatchRule::Scheduled,
//! });
//!
//! assert_eq!(log.events_for_patient("P1001").len(), 1);
//! ```

use crate::models::area::AdmissionOutcome;
use crate::models::category::Category;
use serde::{Deserialize, Serialize};

/// Scheduling rule that triggered a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchRule {
    /// Time-driven service every N ticks
    Scheduled,
    /// Load-driven extra service when the in-flight count piles up
    OverflowRelief,
}

/// Simulation event capturing a state change.
///
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Arrival {
        tick: usize,
        patient_id: String,
        category: Category,
        area: String,
    },

    AreaAdmission {
        tick: usize,
        patient_id: String,
        area: String,
        outcome: AdmissionOutcome,
    },

    Dispatch {
        tick: usize,
        patient_id: String,
        category: Category,
        wait_minutes: u64,
        rule: DispatchRule,
    },

    SlaBreach {
        tick: usize,
        patient_id: String,
        category: Category,
        wait_minutes: u64,
        limit_minutes: u64,
    },

    CategoryReassigned {
        tick: usize,
        patient_id: String,
        old_category: Category,
        new_category: Category,
    },

    SimulationCompleted {
        tick: usize,
        total_served: usize,
        still_waiting: usize,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::Arrival { tick, .. } => *tick,
            Event::AreaAdmission { tick, .. } => *tick,
            Event::Dispatch { tick, .. } => *tick,
            Event::SlaBreach { tick, .. } => *tick,
            Event::CategoryReassigned { tick, .. } => *tick,
            Event::SimulationCompleted { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Arrival { .. } => "Arrival",
            Event::AreaAdmission { .. } => "AreaAdmission",
            Event::Dispatch { .. } => "Dispatch",
            Event::SlaBreach { .. } => "SlaBreach",
            Event::CategoryReassigned { .. } => "CategoryReassigned",
            Event::SimulationCompleted { .. } => "SimulationCompleted",
        }
    }

    /// Get patient ID if event relates to a specific patient
    pub fn patient_id(&self) -> Option<&str> {
        match self {
            Event::Arrival { patient_id, .. } => Some(patient_id),
            Event::AreaAdmission { patient_id, .. } => Some(patient_id),
            Event::Dispatch { patient_id, .. } => Some(patient_id),
            Event::SlaBreach { patient_id, .. } => Some(patient_id),
            Event::CategoryReassigned { patient_id, .. } => Some(patient_id),
            Event::SimulationCompleted { .. } => None,
        }
    }
}

/// Event log for storing and querying simulation events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific patient
    pub fn events_for_patient(&self, patient_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.patient_id() == Some(patient_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrival(tick: usize, id: &str) -> Event {
        Event::Arrival {
            tick,
            patient_id: id.to_string(),
            category: Category::C3,
            area: "SAPU".to_string(),
        }
    }

    #[test]
    fn test_event_accessors() {
        let event = Event::SlaBreach {
            tick: 42,
            patient_id: "P1003".to_string(),
            category: Category::C1,
            wait_minutes: 3,
            limit_minutes: 0,
        };

        assert_eq!(event.tick(), 42);
        assert_eq!(event.event_type(), "SlaBreach");
        assert_eq!(event.patient_id(), Some("P1003"));
    }

    #[test]
    fn test_completion_has_no_patient() {
        let event = Event::SimulationCompleted {
            tick: 1439,
            total_served: 10,
            still_waiting: 0,
        };
        assert_eq!(event.patient_id(), None);
    }

    #[test]
    fn test_event_log_queries() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.log(arrival(0, "P1000"));
        log.log(Event::Dispatch {
            tick: 0,
            patient_id: "P1000".to_string(),
            category: Category::C3,
            wait_minutes: 1,
            rule: DispatchRule::Scheduled,
        });
        log.log(arrival(10, "P1001"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_at_tick(0).len(), 2);
        assert_eq!(log.events_of_type("Arrival").len(), 2);
        assert_eq!(log.events_for_patient("P1000").len(), 2);
        assert_eq!(log.events_for_patient("P1001").len(), 1);
    }
}
