//! Domain models for the triage simulator

pub mod area;
pub mod category;
pub mod event;
pub mod patient;
pub mod registry;
pub mod triage_queue;

// Re-exports
pub use area::{AdmissionOutcome, AreaQueue};
pub use category::{Category, PatientError};
pub use event::{DispatchRule, Event, EventLog};
pub use patient::{Patient, PatientStatus};
pub use registry::HospitalRegistry;
pub use triage_queue::{QueueOrdering, TriageQueue};
