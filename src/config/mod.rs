// ABOUTME: Configuration types and parsing for stagehand.yml.
// ABOUTME: Unit declarations, primary-unit options, and the global deadline.

mod unit;

pub use unit::{DeployOptions, UnitDeploy};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "stagehand.yml";
pub const CONFIG_FILENAME_ALT: &str = "stagehand.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stagehand/config.yml";

/// Startup deployment configuration, read once and handed to the
/// orchestrator as plain values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Config-declared units, in declaration order.
    #[serde(default)]
    pub units: Vec<UnitDeploy>,

    /// Deploy options for the primary unit. The unit instance itself is
    /// provided programmatically; absent instance means skip.
    #[serde(default)]
    pub primary: DeployOptions,

    /// Global deadline on the whole run. Zero or absent means wait
    /// indefinitely.
    #[serde(default, with = "humantime_serde")]
    pub deploy_timeout: Option<Duration>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// The effective global deadline. Zero durations are treated as "no
    /// deadline", matching the `<= 0` contract of the config surface.
    pub fn deadline(&self) -> Option<Duration> {
        self.deploy_timeout.filter(|t| !t.is_zero())
    }
}
