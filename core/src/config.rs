use crate::{
    error::{SimError, SimResult},
    types::{Anchor, Color},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One department's fixed placement in the office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentConfig {
    pub name: String,
    pub x: f32,
    pub z: f32,
    pub color: Color,
}

impl DepartmentConfig {
    pub fn new(name: &str, x: f32, z: f32, color: Color) -> Self {
        Self { name: name.to_string(), x, z, color }
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::new(self.x, self.z)
    }
}

/// Everything the engine needs to start. Omitted fields fall back to the
/// stock office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeConfig {
    /// Ordered: candidate departments are offered in this order.
    pub departments: Vec<DepartmentConfig>,
    /// Score a department earns per hire.
    pub hire_score: u32,
    /// Half-width of the square new hires are scattered over.
    pub spawn_jitter: f32,
    /// Transfer timer period.
    pub transfer_interval_ms: u64,
    pub walk_frames: u32,
    pub walk_fps: u32,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self::default_office()
    }
}

impl OfficeConfig {
    /// Load from a JSON file. Missing keys take the stock values.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimError::Other(anyhow::anyhow!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> SimResult<Self> {
        let config: OfficeConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The stock six-department office.
    pub fn default_office() -> Self {
        Self {
            departments: vec![
                DepartmentConfig::new("Marketing", -40.0, 0.0, Color::rgb(0xf4, 0x43, 0x36)),
                DepartmentConfig::new("Sales", -20.0, 0.0, Color::rgb(0xff, 0x98, 0x00)),
                DepartmentConfig::new("Delivery", 0.0, 20.0, Color::rgb(0x4c, 0xaf, 0x50)),
                DepartmentConfig::new("Support", 20.0, 20.0, Color::rgb(0x9e, 0x9e, 0x9e)),
                DepartmentConfig::new("Customers", 0.0, 40.0, Color::rgb(0x21, 0x96, 0xf3)),
                DepartmentConfig::new("Management", 0.0, -30.0, Color::rgb(0xff, 0xeb, 0x3b)),
            ],
            hire_score: 10,
            spawn_jitter: 5.0,
            transfer_interval_ms: 8000,
            walk_frames: 60,
            walk_fps: 30,
        }
    }

    /// Config with the given layout and stock constants, for unit tests.
    pub fn with_departments(departments: Vec<DepartmentConfig>) -> Self {
        Self { departments, ..Self::default_office() }
    }

    /// Reject layouts the registry could not be built from.
    pub fn validate(&self) -> SimResult<()> {
        if self.departments.is_empty() {
            return Err(SimError::InvalidArgument("department layout is empty".into()));
        }
        let mut seen = HashSet::new();
        for dept in &self.departments {
            if dept.name.trim().is_empty() {
                return Err(SimError::InvalidArgument("department name is blank".into()));
            }
            if !seen.insert(dept.name.as_str()) {
                return Err(SimError::InvalidArgument(format!(
                    "department '{}' is listed twice",
                    dept.name
                )));
            }
            if !dept.anchor().is_finite() {
                return Err(SimError::InvalidArgument(format!(
                    "department '{}' has a non-finite anchor",
                    dept.name
                )));
            }
        }
        if !self.spawn_jitter.is_finite() || self.spawn_jitter < 0.0 {
            return Err(SimError::InvalidArgument("spawn_jitter must be >= 0".into()));
        }
        if self.transfer_interval_ms == 0 {
            return Err(SimError::InvalidArgument("transfer_interval_ms must be > 0".into()));
        }
        if self.walk_frames == 0 || self.walk_fps == 0 {
            return Err(SimError::InvalidArgument("walk_frames and walk_fps must be > 0".into()));
        }
        Ok(())
    }
}
