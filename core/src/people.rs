//! Person store — every simulated person and their current department.
//!
//! RULE: A person's `department` and the department's person set always
//! agree. Both are updated together here and nowhere else.

use crate::{
    bus::TransitionRequest,
    error::{SimError, SimResult},
    registry::DepartmentRegistry,
    types::{DepartmentName, PersonId, RenderHandle, Tick},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub department: DepartmentName,
    pub handle: Option<RenderHandle>,
    pub hired_at: Tick,
}

#[derive(Debug, Default)]
pub struct PersonStore {
    persons: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl PersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a new person to `department`. Score accrual is the caller's
    /// job; this only keeps membership consistent.
    pub fn create_person(
        &mut self,
        registry: &mut DepartmentRegistry,
        department: &str,
        id: PersonId,
        tick: Tick,
    ) -> SimResult<&Person> {
        if self.index.contains_key(&id) {
            return Err(SimError::InvalidArgument(format!("person {id} already exists")));
        }
        registry.get_mut(department)?.admit(id);

        let slot = self.persons.len();
        self.persons.push(Person {
            id,
            department: department.to_string(),
            handle: None,
            hired_at: tick,
        });
        self.index.insert(id, slot);
        Ok(&self.persons[slot])
    }

    /// Move a person to another department.
    ///
    /// Returns `Ok(None)` when `to` is already the person's department.
    /// Scores are untouched: a transfer is not new business.
    pub fn reassign(
        &mut self,
        registry: &mut DepartmentRegistry,
        id: PersonId,
        to: &str,
    ) -> SimResult<Option<TransitionRequest>> {
        let slot = *self.index.get(&id).ok_or_else(|| SimError::person_not_found(id))?;
        let to_anchor = registry.anchor(to)?;
        let from = self.persons[slot].department.clone();
        if from == to {
            return Ok(None);
        }
        let from_anchor = registry.anchor(&from)?;

        if !registry.get_mut(&from)?.release(id) {
            return Err(SimError::Other(anyhow::anyhow!(
                "person {id} missing from department '{from}'"
            )));
        }
        registry.get_mut(to)?.admit(id);

        let person = &mut self.persons[slot];
        person.department = to.to_string();

        Ok(Some(TransitionRequest {
            person_id: id,
            handle: person.handle,
            from,
            to: to.to_string(),
            from_anchor,
            to_anchor,
        }))
    }

    /// Bind the presentation layer's handle to a person.
    pub fn attach_handle(&mut self, id: PersonId, handle: RenderHandle) -> SimResult<()> {
        let slot = *self.index.get(&id).ok_or_else(|| SimError::person_not_found(id))?;
        self.persons[slot].handle = Some(handle);
        Ok(())
    }

    pub fn get(&self, id: PersonId) -> SimResult<&Person> {
        self.index
            .get(&id)
            .map(|&slot| &self.persons[slot])
            .ok_or_else(|| SimError::person_not_found(id))
    }

    /// The n-th person in hiring order.
    pub fn nth(&self, n: usize) -> Option<&Person> {
        self.persons.get(n)
    }

    /// Everyone, in hiring order. Each call starts a fresh pass over the
    /// current state.
    pub fn list_all(&self) -> impl Iterator<Item = &Person> + '_ {
        self.persons.iter()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}
