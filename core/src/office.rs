//! The office state: departments and the people in them.

use crate::{
    bus::TransitionRequest,
    config::DepartmentConfig,
    error::SimResult,
    people::PersonStore,
    registry::DepartmentRegistry,
    types::PersonId,
};

#[derive(Debug)]
pub struct Office {
    pub registry: DepartmentRegistry,
    pub people: PersonStore,
}

impl Office {
    pub fn new(layout: &[DepartmentConfig]) -> SimResult<Self> {
        Ok(Self {
            registry: DepartmentRegistry::initialize(layout)?,
            people: PersonStore::new(),
        })
    }

    pub fn reassign(&mut self, id: PersonId, to: &str) -> SimResult<Option<TransitionRequest>> {
        self.people.reassign(&mut self.registry, id, to)
    }
}
