//! JSON run settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use hk_core::CrowdConfig;

/// Top-level settings file.  Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub crowd:           CrowdConfig,
    /// Fixed steps to simulate after boot.
    pub ticks:           u64,
    /// Where CSV trajectories go; `null` disables output.
    pub output_dir:      Option<PathBuf>,
    pub output_interval: u64,
    pub services:        Vec<ServiceSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            crowd:           CrowdConfig::default(),
            ticks:           600,
            output_dir:      None,
            output_interval: 10,
            services:        vec![
                ServiceSettings::named("assets", 0),
                ServiceSettings::named("scene", 10),
            ],
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

/// One mock service brought up by the boot sequencer.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub name:     String,
    pub priority: i32,
    pub required: bool,
    /// Progress reports during initialization.
    pub steps:    u32,
    /// Simulated work per step.
    pub step_ms:  u64,
    /// If set, initialization fails with this message.
    pub fail:     Option<String>,
}

impl ServiceSettings {
    fn named(name: &str, priority: i32) -> Self {
        Self { name: name.to_owned(), priority, ..Self::default() }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name:     String::new(),
            priority: 0,
            required: true,
            steps:    3,
            step_ms:  20,
            fail:     None,
        }
    }
}
