//! Department registry — the fixed catalog of departments.
//!
//! RULE: The department set is fixed once the registry is built.
//! Only two fields change afterwards: `score` (owned by scoring.rs)
//! and the person set (owned by people.rs).

use crate::{
    config::DepartmentConfig,
    error::{SimError, SimResult},
    types::{Anchor, Color, PersonId},
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Department {
    name: String,
    anchor: Anchor,
    color: Color,
    score: u64,
    people: Vec<PersonId>,
}

impl Department {
    fn from_config(config: &DepartmentConfig) -> Self {
        Self {
            name: config.name.clone(),
            anchor: config.anchor(),
            color: config.color,
            score: 0,
            people: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// People currently assigned here, in arrival order.
    pub fn people(&self) -> &[PersonId] {
        &self.people
    }

    pub fn people_count(&self) -> usize {
        self.people.len()
    }

    pub(crate) fn add_score(&mut self, amount: u64) -> u64 {
        self.score = self.score.saturating_add(amount);
        self.score
    }

    pub(crate) fn admit(&mut self, person: PersonId) {
        self.people.push(person);
    }

    /// Returns false if the person was not assigned here.
    pub(crate) fn release(&mut self, person: PersonId) -> bool {
        match self.people.iter().position(|p| *p == person) {
            Some(idx) => {
                self.people.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DepartmentRegistry {
    departments: Vec<Department>,
    index: HashMap<String, usize>,
}

impl DepartmentRegistry {
    /// Build the registry from a layout. Fails on an empty layout, a blank
    /// or duplicate name, or a non-finite anchor.
    pub fn initialize(layout: &[DepartmentConfig]) -> SimResult<Self> {
        if layout.is_empty() {
            return Err(SimError::InvalidArgument("department layout is empty".into()));
        }
        let mut departments = Vec::with_capacity(layout.len());
        let mut index = HashMap::with_capacity(layout.len());
        for config in layout {
            if config.name.trim().is_empty() {
                return Err(SimError::InvalidArgument("department name is blank".into()));
            }
            if !config.anchor().is_finite() {
                return Err(SimError::InvalidArgument(format!(
                    "department '{}' has a non-finite anchor",
                    config.name
                )));
            }
            if index.insert(config.name.clone(), departments.len()).is_some() {
                return Err(SimError::InvalidArgument(format!(
                    "department '{}' is listed twice",
                    config.name
                )));
            }
            departments.push(Department::from_config(config));
        }
        Ok(Self { departments, index })
    }

    pub fn get(&self, name: &str) -> SimResult<&Department> {
        self.index
            .get(name)
            .map(|&i| &self.departments[i])
            .ok_or_else(|| SimError::department_not_found(name))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> SimResult<&mut Department> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.departments[i]),
            None => Err(SimError::department_not_found(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn anchor(&self, name: &str) -> SimResult<Anchor> {
        self.get(name).map(Department::anchor)
    }

    /// Department names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.departments.iter().map(|d| d.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Department> + '_ {
        self.departments.iter()
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}
