//! In-memory event log.
//!
//! RULE: Only the engine appends. The log lives and dies with the process.

use crate::{
    error::SimResult,
    event::{EventLogEntry, OfficeEvent},
    types::Tick,
};

#[derive(Debug, Default)]
pub struct EventStore {
    entries: Vec<EventLogEntry>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_event(&mut self, tick: Tick, source: &str, event: &OfficeEvent) -> SimResult<()> {
        let entry = EventLogEntry {
            seq:        self.entries.len() as u64,
            tick,
            source:     source.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.entries.push(entry);
        Ok(())
    }

    pub fn events_for_tick(&self, tick: Tick) -> Vec<&EventLogEntry> {
        self.entries.iter().filter(|e| e.tick == tick).collect()
    }

    pub fn count_of_type(&self, event_type: &str) -> usize {
        self.entries.iter().filter(|e| e.event_type == event_type).count()
    }

    /// Decode every entry back into events, in append order.
    pub fn decode_all(&self) -> SimResult<Vec<OfficeEvent>> {
        self.entries
            .iter()
            .map(|e| serde_json::from_str(&e.payload).map_err(Into::into))
            .collect()
    }

    pub fn entries(&self) -> &[EventLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
