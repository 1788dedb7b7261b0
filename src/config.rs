//! Configuration for the roster viewer.

use std::path::{Path, PathBuf};

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::data::model::GradeScale;

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/student.txt")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Interactive shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Print the title and command list on startup.
    #[serde(default = "default_banner")]
    pub banner: bool,
}

fn default_prompt() -> String {
    "roster> ".to_string()
}

fn default_banner() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            banner: default_banner(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub grades: GradeScale,
    #[serde(default)]
    pub shell: ShellConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and the
    /// environment (`ROSTER_DATA__PATH`, `ROSTER_GRADES__MAX`, ...).
    ///
    /// Without `file`, `roster.{toml,json,yaml}` in the working directory is
    /// used when present.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("roster").required(false),
        };

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("ROSTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let GradeScale { min, max } = self.grades;
        if !min.is_finite() || !max.is_finite() || min >= max {
            bail!("invalid grade scale: min {min} must be below max {max}");
        }
        Ok(())
    }
}
