//! Event filtering by type and fighter.

use std::collections::BTreeSet;

use luchadores_engine::{CombatEvent, CombatRecord};
use thiserror::Error;

/// Errors from building an [`EventFilter`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The name is not one of [`CombatEvent::TYPES`].
    #[error("unknown event type '{0}' (expected one of: {types})", types = CombatEvent::TYPES.join(", "))]
    UnknownEventType(String),
}

/// Selects which records a consumer shows.
///
/// An empty filter passes everything. `CombatEnd` has no actor, so a fighter
/// filter always lets it through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFilter {
    types: BTreeSet<&'static str>,
    fighters: BTreeSet<String>,
}

impl EventFilter {
    /// Creates a filter that passes everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of event type names such as
    /// `"action-applied,combo-executed"`.
    ///
    /// # Errors
    /// Returns [`FilterError::UnknownEventType`] for a name that is not an event type.
    pub fn parse_types(list: &str) -> Result<Self, FilterError> {
        let mut filter = Self::new();
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            filter = filter.with_type(name)?;
        }
        Ok(filter)
    }

    /// Adds an event type to pass.
    ///
    /// # Errors
    /// Returns [`FilterError::UnknownEventType`] for a name that is not an event type.
    pub fn with_type(mut self, name: &str) -> Result<Self, FilterError> {
        let known = CombatEvent::TYPES
            .iter()
            .find(|t| **t == name)
            .ok_or_else(|| FilterError::UnknownEventType(name.to_string()))?;
        self.types.insert(known);
        Ok(self)
    }

    /// Adds a fighter whose events pass.
    #[must_use]
    pub fn with_fighter(mut self, name: impl Into<String>) -> Self {
        self.fighters.insert(name.into());
        self
    }

    /// Returns true if the filter passes everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.fighters.is_empty()
    }

    /// Returns true if the record passes.
    #[must_use]
    pub fn matches(&self, record: &CombatRecord) -> bool {
        let type_ok = self.types.is_empty() || self.types.contains(record.event_type());
        let fighter_ok = self.fighters.is_empty()
            || record
                .event
                .actor()
                .is_none_or(|actor| self.fighters.contains(actor));
        type_ok && fighter_ok
    }

    /// Applies the filter to a sequence of records.
    pub fn apply<'a>(
        &self,
        records: impl IntoIterator<Item = &'a CombatRecord>,
    ) -> Vec<&'a CombatRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
