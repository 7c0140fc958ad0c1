use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::groups::{CapacityGroup, CoreGroup, DemandGroup};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Config {
    /// Optional name for configuration
    pub name: Option<String>,

    /// Coordinate reference system of all inputs, written into outputs
    #[serde(default = "default_crs")]
    pub crs: String,

    #[serde(default)]
    pub core: CoreGroup,

    #[serde(default)]
    pub capacity: CapacityGroup,

    #[serde(default)]
    pub demand: DemandGroup,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: None,
            crs: default_crs(),
            core: CoreGroup::default(),
            capacity: CapacityGroup::default(),
            demand: DemandGroup::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .context(format!("failed to read config from '{}'", path.display()))?;
        Self::from_yaml(&s)
    }

    /// Load from an optional path, falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }

    pub fn valid(&self) -> Result<()> {
        self.core.valid().context("invalid 'core' configuration")?;
        self.capacity
            .valid()
            .context("invalid 'capacity' configuration")?;
        self.demand
            .valid()
            .context("invalid 'demand' configuration")?;
        Ok(())
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("Failed to parse .yaml config")
    }

    /// Resolved configuration, defaults included
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialise config")
    }
}

fn default_crs() -> String {
    "epsg:27700".to_string()
}
