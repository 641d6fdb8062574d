//! Read-side views of the office for the presentation layer.
//!
//! Nothing here is pushed. The presentation layer pulls a `DisplayState`
//! after each mutation it triggers, and once per frame.

use crate::{
    clock::SimClock,
    registry::DepartmentRegistry,
    types::{Anchor, Color, Tick},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a department's floating label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub people_count: usize,
    pub score: u64,
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} people • Score {}", self.people_count, self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSnapshot {
    pub name: String,
    pub anchor: Anchor,
    pub color: Color,
    pub people_count: usize,
    pub score: u64,
}

/// Every department, in configuration order, plus the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeSnapshot {
    pub tick: Tick,
    pub clock: SimClock,
    pub population: usize,
    pub departments: Vec<DepartmentSnapshot>,
}

impl OfficeSnapshot {
    pub fn capture(registry: &DepartmentRegistry, clock: &SimClock, population: usize) -> Self {
        Self {
            tick: clock.current_tick,
            clock: clock.clone(),
            population,
            departments: registry
                .iter()
                .map(|d| DepartmentSnapshot {
                    name: d.name().to_string(),
                    anchor: d.anchor(),
                    color: d.color(),
                    people_count: d.people_count(),
                    score: d.score(),
                })
                .collect(),
        }
    }

    pub fn department(&self, name: &str) -> Option<&DepartmentSnapshot> {
        self.departments.iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_text_matches_bubble_format() {
        let state = DisplayState { people_count: 3, score: 40 };
        assert_eq!(state.to_string(), "3 people • Score 40");
    }
}
