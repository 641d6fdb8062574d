use std::fmt;
use thiserror::Error;

/// What kind of entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Department,
    Person,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Department => f.write_str("Department"),
            Self::Person => f.write_str("Person"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn department_not_found(name: &str) -> Self {
        Self::NotFound { kind: EntityKind::Department, name: name.to_string() }
    }

    pub fn person_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound { kind: EntityKind::Person, name: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type SimResult<T> = Result<T, SimError>;
