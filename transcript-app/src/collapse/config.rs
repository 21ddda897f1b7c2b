//! Collapse settings

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};

const DEFAULT_SETTINGS: &str = r#"
[collapse]
prune-stale = false
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CollapseConfig {
    /// Forget collapsed groups whose marker is gone when the transcript is
    /// replaced
    pub prune_stale: bool,
}

impl CollapseConfig {
    /// Load the `[collapse]` table from the settings file at `path`, on top
    /// of the built-in defaults. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            let settings = Self::defaults()
                .build()
                .context("failed to build default collapse settings")?;
            return Self::from_settings(&settings);
        };

        if path.exists() {
            tracing::info!("Loading collapse settings from {:?}", path);
        }
        let settings = Self::defaults()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .build()
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_settings(&settings)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Self::defaults()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .context("failed to parse collapse settings")?;
        Self::from_settings(&settings)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
    }

    fn from_settings(settings: &Config) -> Result<Self> {
        settings
            .get::<CollapseConfig>("collapse")
            .context("invalid [collapse] settings")
    }
}
