//! Triage priority queue
//!
//! Ranks patient ids by category. The queue stores only ids and the key each
//! id was ranked under; the canonical [`Patient`](crate::Patient) lives in the
//! registry. Changing a patient's category does not move it here until
//! [`TriageQueue::reprioritize`] is called, so a caller that skips the call
//! observes the stale key through [`TriageQueue::queued_category`].
//!
//! # Ordering
//!
//! Entries are ordered by `(rank, arrival time, admission sequence)`:
//! - `UrgentFirst`: rank = category level, C1 leaves first
//! - `LeastUrgentFirst`: rank = inverted level, C5 leaves first
//!
//! Equal categories leave FIFO by arrival time, then by admission order.

use crate::models::category::Category;
use crate::models::patient::Patient;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Which end of the category scale leaves the queue first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueueOrdering {
    /// C1 before C5
    #[default]
    UrgentFirst,
    /// C5 before C1
    LeastUrgentFirst,
}

impl QueueOrdering {
    fn rank(self, category: Category) -> u8 {
        match self {
            QueueOrdering::UrgentFirst => category.level(),
            QueueOrdering::LeastUrgentFirst => 6 - category.level(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    rank: u8,
    arrival_time: u64,
    seq: u64,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    key: RankKey,
    category: Category,
}

/// Id-based priority queue with removal and re-ranking
///
/// # Example
/// ```
/// use triage_simulator_core_rs::models::triage_queue::{QueueOrdering, TriageQueue};
/// use triage_simulator_core_rs::Category;
///
/// let mut queue = TriageQueue::new(QueueOrdering::UrgentFirst);
/// queue.push("P1000", Category::C4, 0);
/// queue.push("P1001", Category::C1, 600);
///
/// assert_eq!(queue.pop().as_deref(), Some("P1001"));
/// assert_eq!(queue.pop().as_deref(), Some("P1000"));
/// assert!(queue.pop().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TriageQueue {
    ordering: QueueOrdering,
    ranked: BTreeMap<RankKey, String>,
    slots: HashMap<String, Slot>,
    next_seq: u64,
}

impl TriageQueue {
    pub fn new(ordering: QueueOrdering) -> Self {
        Self {
            ordering,
            ranked: BTreeMap::new(),
            slots: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Insert `id`, or re-rank it in place if already queued
    pub fn push(&mut self, id: impl Into<String>, category: Category, arrival_time: u64) {
        let id = id.into();
        let seq = match self.slots.get(&id) {
            Some(slot) => {
                self.ranked.remove(&slot.key);
                slot.key.seq
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };

        let key = RankKey {
            rank: self.ordering.rank(category),
            arrival_time,
            seq,
        };
        self.ranked.insert(key, id.clone());
        self.slots.insert(id, Slot { key, category });
    }

    /// Remove and return the head of the queue
    pub fn pop(&mut self) -> Option<String> {
        let (_, id) = self.ranked.pop_first()?;
        self.slots.remove(&id);
        Some(id)
    }

    /// Head of the queue without removing it
    pub fn peek(&self) -> Option<&str> {
        self.ranked.values().next().map(String::as_str)
    }

    /// Remove `id` wherever it sits; returns whether it was queued
    pub fn remove(&mut self, id: &str) -> bool {
        match self.slots.remove(id) {
            Some(slot) => {
                self.ranked.remove(&slot.key);
                true
            }
            None => false,
        }
    }

    /// Re-rank `id` under a new category, keeping its arrival/admission tie-break
    ///
    /// Returns `false` (and does nothing) when `id` is not queued.
    pub fn reprioritize(&mut self, id: &str, category: Category) -> bool {
        let Some(slot) = self.slots.get(id).copied() else {
            return false;
        };
        self.ranked.remove(&slot.key);
        let key = RankKey {
            rank: self.ordering.rank(category),
            ..slot.key
        };
        self.ranked.insert(key, id.to_string());
        self.slots.insert(id.to_string(), Slot { key, category });
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Category the id is currently ranked under
    pub fn queued_category(&self, id: &str) -> Option<Category> {
        self.slots.get(id).map(|slot| slot.category)
    }

    /// Queued ids in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ranked.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ordering(&self) -> QueueOrdering {
        self.ordering
    }
}

impl Default for TriageQueue {
    fn default() -> Self {
        Self::new(QueueOrdering::default())
    }
}

/// Order patients as the urgent-first dispatch queue would serve them
///
/// # Example
/// ```
/// use triage_simulator_core_rs::models::triage_queue::sort_by_urgency;
/// use triage_simulator_core_rs::{Category, Patient};
///
/// let sorted = sort_by_urgency(vec![
///     Patient::new("Ana", "Soto", "P1", Category::C5, 0, "SAPU"),
///     Patient::new("Luis", "Rojas", "P2", Category::C1, 600, "SAPU"),
/// ]);
/// assert_eq!(sorted[0].id(), "P2");
/// ```
pub fn sort_by_urgency(patients: Vec<Patient>) -> Vec<Patient> {
    let mut queue = TriageQueue::new(QueueOrdering::UrgentFirst);
    let mut by_id: HashMap<String, Patient> = HashMap::with_capacity(patients.len());
    for patient in patients {
        queue.push(patient.id(), patient.category(), patient.arrival_time());
        by_id.insert(patient.id().to_string(), patient);
    }
    std::iter::from_fn(|| queue.pop())
        .filter_map(|id| by_id.remove(&id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TriageQueue) -> Vec<String> {
        std::iter::from_fn(|| queue.pop()).collect()
    }

    #[test]
    fn test_urgent_first_ordering() {
        let mut queue = TriageQueue::new(QueueOrdering::UrgentFirst);
        queue.push("a", Category::C3, 0);
        queue.push("b", Category::C1, 600);
        queue.push("c", Category::C5, 1200);
        queue.push("d", Category::C2, 1800);

        assert_eq!(drain(&mut queue), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_least_urgent_first_ordering() {
        let mut queue = TriageQueue::new(QueueOrdering::LeastUrgentFirst);
        queue.push("a", Category::C3, 0);
        queue.push("b", Category::C1, 600);
        queue.push("c", Category::C5, 1200);

        assert_eq!(drain(&mut queue), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_ties_are_fifo_by_arrival() {
        let mut queue = TriageQueue::default();
        queue.push("late", Category::C2, 1200);
        queue.push("early", Category::C2, 0);
        queue.push("middle", Category::C2, 600);

        assert_eq!(drain(&mut queue), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_same_arrival_falls_back_to_admission_order() {
        let mut queue = TriageQueue::default();
        queue.push("first", Category::C4, 0);
        queue.push("second", Category::C4, 0);

        assert_eq!(drain(&mut queue), vec!["first", "second"]);
    }

    #[test]
    fn test_push_existing_id_does_not_duplicate() {
        let mut queue = TriageQueue::default();
        queue.push("a", Category::C5, 0);
        queue.push("a", Category::C1, 0);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.queued_category("a"), Some(Category::C1));
    }

    #[test]
    fn test_remove_from_middle() {
        let mut queue = TriageQueue::default();
        queue.push("a", Category::C1, 0);
        queue.push("b", Category::C2, 0);
        queue.push("c", Category::C3, 0);

        assert!(queue.remove("b"));
        assert!(!queue.remove("b"));
        assert_eq!(drain(&mut queue), vec!["a", "c"]);
    }

    #[test]
    fn test_reprioritize_moves_entry() {
        let mut queue = TriageQueue::default();
        queue.push("a", Category::C2, 0);
        queue.push("b", Category::C4, 600);

        assert!(queue.reprioritize("b", Category::C1));
        assert_eq!(queue.peek(), Some("b"));
        assert!(!queue.reprioritize("missing", Category::C1));
    }

    #[test]
    fn test_iter_is_dispatch_order() {
        let mut queue = TriageQueue::default();
        queue.push("x", Category::C5, 0);
        queue.push("y", Category::C1, 0);

        let order: Vec<&str> = queue.iter().collect();
        assert_eq!(order, vec!["y", "x"]);
    }
}
