use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result, anyhow};

use crate::intro::IntroPath;

/// Delays driving the intro choreography and the chat "thinking" time.
/// All values are milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Timings {
    pub status_interval_ms: u64,
    pub reveal_delay_ms: u64,
    pub particle_delay_ms: u64,
    pub particle_interval_ms: u64,
    pub hide_choices_delay_ms: u64,
    pub algorithms_farewell_ms: u64,
    pub data_structures_farewell_ms: u64,
    pub redirect_delay_ms: u64,
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            status_interval_ms: 600,
            reveal_delay_ms: 800,
            particle_delay_ms: 500,
            particle_interval_ms: 80,
            hide_choices_delay_ms: 500,
            algorithms_farewell_ms: 1000,
            data_structures_farewell_ms: 1500,
            redirect_delay_ms: 1000,
            reply_delay_min_ms: 1000,
            reply_delay_max_ms: 2000,
        }
    }
}

impl Timings {
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn particle_delay(&self) -> Duration {
        Duration::from_millis(self.particle_delay_ms)
    }

    pub fn particle_interval(&self) -> Duration {
        Duration::from_millis(self.particle_interval_ms)
    }

    pub fn hide_choices_delay(&self) -> Duration {
        Duration::from_millis(self.hide_choices_delay_ms)
    }

    pub fn farewell_delay(&self, path: IntroPath) -> Duration {
        match path {
            IntroPath::Algorithms => Duration::from_millis(self.algorithms_farewell_ms),
            IntroPath::DataStructures => Duration::from_millis(self.data_structures_farewell_ms),
        }
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Inclusive bounds for the reply delay. A max below min collapses to min.
    pub fn reply_delay_bounds(&self) -> (u64, u64) {
        let min = self.reply_delay_min_ms;
        (min, self.reply_delay_max_ms.max(min))
    }
}

/// Where each intro choice leads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NavigationTargets {
    pub algorithms: String,
    pub data_structures: String,
}

impl Default for NavigationTargets {
    fn default() -> Self {
        Self {
            algorithms: "algorithms.html".to_string(),
            data_structures: "datastructures.html".to_string(),
        }
    }
}

impl NavigationTargets {
    pub fn target(&self, path: IntroPath) -> &str {
        match path {
            IntroPath::Algorithms => &self.algorithms,
            IntroPath::DataStructures => &self.data_structures,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub skip_intro: bool,
    pub timings: Timings,
    pub targets: NavigationTargets,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("parsing {}", config_path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("dsa-visualizer"))
    }
}
