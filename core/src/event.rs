//! The event log vocabulary — every state change the engine makes.
//!
//! RULE: Every mutation is recorded as exactly one OfficeEvent.
//! Variants are only ever appended.

use crate::{
    bus::TransitionRequest,
    scoring::AccrualReason,
    types::{Anchor, DepartmentName, PersonId, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfficeEvent {
    // ── Engine events ──────────────────────────────
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },
    DepartmentsInitialized {
        seed: u64,
        departments: Vec<DepartmentName>,
    },
    ClockStopped {
        tick: Tick,
    },

    // ── People and scores ──────────────────────────
    PersonHired {
        tick: Tick,
        person_id: PersonId,
        department: DepartmentName,
        position: Anchor,
    },
    ScoreAccrued {
        tick: Tick,
        department: DepartmentName,
        amount: u64,
        new_score: u64,
        reason: AccrualReason,
    },

    // ── Transfers ──────────────────────────────────
    TransferRequested {
        tick: Tick,
        request: TransitionRequest,
    },
    TransferAborted {
        tick: Tick,
        reason: String,
    },
}

impl OfficeEvent {
    /// Stable name, used as the event_type of a log entry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::TickStarted { .. }            => "tick_started",
            Self::TickCompleted { .. }          => "tick_completed",
            Self::DepartmentsInitialized { .. } => "departments_initialized",
            Self::ClockStopped { .. }           => "clock_stopped",
            Self::PersonHired { .. }            => "person_hired",
            Self::ScoreAccrued { .. }           => "score_accrued",
            Self::TransferRequested { .. }      => "transfer_requested",
            Self::TransferAborted { .. }        => "transfer_aborted",
        }
    }
}

/// One recorded event with where and when it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq:        u64,
    pub tick:       Tick,
    pub source:     String,
    pub event_type: String,
    pub payload:    String, // JSON-serialized OfficeEvent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_tag() {
        let event = OfficeEvent::TransferAborted { tick: 3, reason: "gone".into() };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"transfer_aborted""#), "{json}");
        assert_eq!(event.type_name(), "transfer_aborted");
    }
}
