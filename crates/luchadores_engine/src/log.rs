//! The ordered event log of one combat.

use std::collections::HashMap;

use crate::event::CombatEvent;

// =============================================================================
// Combat Record
// =============================================================================

/// An event tagged with its position in the combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatRecord {
    /// Sequence number, starting at 0.
    pub id: u64,
    /// Round the event occurred in. `CombatEnd` carries the last round played.
    pub round: u32,
    /// The event.
    pub event: CombatEvent,
}

impl CombatRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(id: u64, round: u32, event: CombatEvent) -> Self {
        Self { id, round, event }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Event Log
// =============================================================================

/// Every event of one combat, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    records: Vec<CombatRecord>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its id.
    pub fn push(&mut self, round: u32, event: CombatEvent) -> u64 {
        let id = self.records.len() as u64;
        self.records.push(CombatRecord::new(id, round, event));
        id
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over all records.
    pub fn iter(&self) -> impl Iterator<Item = &CombatRecord> {
        self.records.iter()
    }

    /// Returns an iterator over the events alone.
    pub fn events(&self) -> impl Iterator<Item = &CombatEvent> {
        self.records.iter().map(|r| &r.event)
    }

    /// Returns records for a specific round.
    #[must_use]
    pub fn records_for_round(&self, round: u32) -> Vec<&CombatRecord> {
        self.filter(|r| r.round == round)
    }

    /// Returns records matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> Vec<&CombatRecord>
    where
        F: Fn(&CombatRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Returns records of a specific event type.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&CombatRecord> {
        self.filter(|r| r.event_type() == event_type)
    }

    /// Returns the last record, normally `CombatEnd`.
    #[must_use]
    pub fn last(&self) -> Option<&CombatRecord> {
        self.records.last()
    }

    /// Returns statistics about the log.
    #[must_use]
    pub fn stats(&self) -> EventLogStats {
        let mut event_counts = HashMap::new();
        for record in &self.records {
            *event_counts.entry(record.event_type()).or_insert(0) += 1;
        }

        EventLogStats {
            record_count: self.records.len(),
            last_round: self.records.last().map(|r| r.round),
            event_counts,
        }
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a CombatRecord;
    type IntoIter = std::slice::Iter<'a, CombatRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Log Statistics
// =============================================================================

/// Statistics about an event log.
#[derive(Clone, Debug)]
pub struct EventLogStats {
    /// Number of records.
    pub record_count: usize,
    /// Round of the last record.
    pub last_round: Option<u32>,
    /// Count of each event type.
    pub event_counts: HashMap<&'static str, usize>,
}

impl EventLogStats {
    /// Returns the count for one event type.
    #[must_use]
    pub fn count(&self, event_type: &str) -> usize {
        self.event_counts.get(event_type).copied().unwrap_or(0)
    }
}
