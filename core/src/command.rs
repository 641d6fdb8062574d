use serde::{Deserialize, Serialize};
use crate::types::{DepartmentName, PersonId};

/// Input events the presentation layer forwards into the core.
/// Variants are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum OfficeCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
    SetSpeed { speed: crate::clock::SimSpeed },

    // ── Office actions ────────────────────────────
    Hire {
        department: DepartmentName,
    },
    Boost {
        department: DepartmentName,
        amount:     i64,
    },
    Transfer {
        person_id:  PersonId,
        department: DepartmentName,
    },
}

/// What applying a command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum CommandOutcome {
    Hired(PersonId),
    Boosted(u64),
    Transferred(bool),
    Clock,
}
