//! Department scores.
//!
//! RULE: `accrue` is the only way a score changes, and scores only go up.
//! Callers decide the amount (hire bonus, boost action); this module does
//! not care why.

use crate::{
    error::{SimError, SimResult},
    registry::DepartmentRegistry,
    snapshot::DisplayState,
};
use serde::{Deserialize, Serialize};

/// Why a department's score moved. Recorded in the event log only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualReason {
    Hire,
    Boost,
}

/// Add `amount` to a department's score and return the new score.
/// Negative amounts and unknown departments are rejected without mutation.
pub fn accrue(registry: &mut DepartmentRegistry, department: &str, amount: i64) -> SimResult<u64> {
    if amount < 0 {
        return Err(SimError::InvalidArgument(format!(
            "score amount must be non-negative, got {amount}"
        )));
    }
    let dept = registry.get_mut(department)?;
    Ok(dept.add_score(amount as u64))
}

pub fn current_score(registry: &DepartmentRegistry, department: &str) -> SimResult<u64> {
    registry.get(department).map(|d| d.score())
}

pub fn people_count(registry: &DepartmentRegistry, department: &str) -> SimResult<usize> {
    registry.get(department).map(|d| d.people_count())
}

pub fn display_state(registry: &DepartmentRegistry, department: &str) -> SimResult<DisplayState> {
    let dept = registry.get(department)?;
    Ok(DisplayState { people_count: dept.people_count(), score: dept.score() })
}
