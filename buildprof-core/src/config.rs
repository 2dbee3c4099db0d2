//! TOML configuration for the profiler and its reports.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, MonotonicClock, SystemClock};
use crate::error::{Error, Result};
use crate::report::SortKey;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "buildprof.toml";

/// Source of default timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    #[default]
    System,
    Monotonic,
}

impl ClockKind {
    pub fn build(&self) -> Box<dyn Clock> {
        match self {
            ClockKind::System => Box::new(SystemClock),
            ClockKind::Monotonic => Box::new(MonotonicClock::new()),
        }
    }
}

/// Report defaults, overridable from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub sort: SortKey,
    /// Maximum number of targets to show.
    pub top: Option<usize>,
}

/// Profiler configuration as defined in `buildprof.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    #[serde(default)]
    pub clock: ClockKind,
    #[serde(default)]
    pub report: ReportConfig,
}

impl ProfilerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ProfilerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: ProfilerConfig = toml::from_str(&content).map_err(|error| Error::Toml {
            error,
            context: path.display().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.report.top == Some(0) {
            return Err(Error::InvalidConfig(
                "report.top must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
