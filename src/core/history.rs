//! Bounded history of committed state changes.
//!
//! History is immutable: `record` returns a new history with the entry
//! appended, dropping the oldest entries once the capacity is reached.

use super::ids::StateId;
use super::transition::TransitionTrigger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of entries kept.
pub const DEFAULT_HISTORY_SIZE: usize = 50;

/// Record of one committed state change.
///
/// # Example
///
/// ```rust
/// use poise::core::{StateHistory, StateHistoryEntry, StateId, TransitionTrigger};
/// use chrono::Utc;
///
/// let hover = StateId::new();
/// let history = StateHistory::with_capacity(10).record(StateHistoryEntry {
///     state_id: hover,
///     timestamp: Utc::now(),
///     trigger: TransitionTrigger::Hover,
/// });
///
/// assert_eq!(history.last().unwrap().state_id, hover);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistoryEntry {
    /// The state that became active
    pub state_id: StateId,
    /// When it became active
    pub timestamp: DateTime<Utc>,
    /// What caused the change
    pub trigger: TransitionTrigger,
}

impl StateHistoryEntry {
    pub fn now(state_id: StateId, trigger: TransitionTrigger) -> Self {
        Self {
            state_id,
            timestamp: Utc::now(),
            trigger,
        }
    }
}

/// Ordered, size-bounded list of history entries, oldest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    entries: Vec<StateHistoryEntry>,
    capacity: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    /// Create an empty history keeping at most `capacity` entries.
    ///
    /// A capacity of zero records nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Record an entry, returning a new history.
    ///
    /// ```rust
    /// use poise::core::{StateHistory, StateHistoryEntry, StateId, TransitionTrigger};
    ///
    /// let history = StateHistory::with_capacity(2);
    /// let a = history.record(StateHistoryEntry::now(StateId::new(), TransitionTrigger::Direct));
    /// let b = a.record(StateHistoryEntry::now(StateId::new(), TransitionTrigger::Direct));
    /// let c = b.record(StateHistoryEntry::now(StateId::new(), TransitionTrigger::Direct));
    ///
    /// assert_eq!(history.len(), 0); // Original unchanged
    /// assert_eq!(c.len(), 2);
    /// assert_eq!(c.entries()[0], b.entries()[1]);
    /// ```
    pub fn record(&self, entry: StateHistoryEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        truncate_front(&mut entries, self.capacity);
        Self {
            entries,
            capacity: self.capacity,
        }
    }

    /// Copy of this history bounded to a new capacity.
    pub fn resized(&self, capacity: usize) -> Self {
        let mut entries = self.entries.clone();
        truncate_front(&mut entries, capacity);
        Self { entries, capacity }
    }

    /// The ids of states visited, oldest first.
    pub fn path(&self) -> Vec<&StateId> {
        self.entries.iter().map(|e| &e.state_id).collect()
    }

    /// Time between the first and last retained entries.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.first()?, self.entries.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn entries(&self) -> &[StateHistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&StateHistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn truncate_front(entries: &mut Vec<StateHistoryEntry>, capacity: usize) {
    if entries.len() > capacity {
        let excess = entries.len() - capacity;
        entries.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(state_id: StateId) -> StateHistoryEntry {
        StateHistoryEntry::now(state_id, TransitionTrigger::Direct)
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(entry(StateId::new()));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn path_returns_visited_states_in_order() {
        let (a, b, c) = (StateId::new(), StateId::new(), StateId::new());
        let history = StateHistory::new()
            .record(entry(a))
            .record(entry(b))
            .record(entry(c));

        assert_eq!(history.path(), vec![&a, &b, &c]);
    }

    #[test]
    fn oldest_entries_are_dropped_at_capacity() {
        let ids: Vec<StateId> = (0..5).map(|_| StateId::new()).collect();
        let history = ids
            .iter()
            .fold(StateHistory::with_capacity(3), |h, id| h.record(entry(*id)));

        assert_eq!(history.len(), 3);
        assert_eq!(history.path(), vec![&ids[2], &ids[3], &ids[4]]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let history = StateHistory::with_capacity(0).record(entry(StateId::new()));
        assert!(history.is_empty());
    }

    #[test]
    fn resized_keeps_newest_entries() {
        let ids: Vec<StateId> = (0..4).map(|_| StateId::new()).collect();
        let history = ids
            .iter()
            .fold(StateHistory::new(), |h, id| h.record(entry(*id)));

        let smaller = history.resized(2);
        assert_eq!(smaller.capacity(), 2);
        assert_eq!(smaller.path(), vec![&ids[2], &ids[3]]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(StateHistoryEntry {
                state_id: StateId::new(),
                timestamp: start,
                trigger: TransitionTrigger::Click,
            })
            .record(StateHistoryEntry {
                state_id: StateId::new(),
                timestamp: start + chrono::Duration::milliseconds(250),
                trigger: TransitionTrigger::Direct,
            });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_entry_has_duration_zero() {
        let history = StateHistory::new().record(entry(StateId::new()));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::with_capacity(7).record(entry(StateId::new()));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
