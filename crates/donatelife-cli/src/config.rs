//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `DONATELIFE__SECTION__KEY`,
//!    e.g. `DONATELIFE__SHELL__PROMPT`
//! 3. Config file (`--config FILE`, or [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::format::{Item, StrftimeItems};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DONATELIFE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Interactive shell settings.
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub prompt: String,
    /// `strftime` pattern used when displaying donation dates.
    pub date_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            shell: ShellConfig {
                prompt: "donatelife> ".into(),
                date_format: "%Y-%m-%d".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration by layering defaults, the config file and the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Invalid built-in defaults")?)
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let loaded: Self = config
            .try_deserialize()
            .context("Configuration has an unexpected shape")?;
        loaded.check()?;
        Ok(loaded)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.donatelife.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "donatelife", "donatelife")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".donatelife.toml"))
    }

    /// The file `load` reads for the given `--config` value.
    pub fn resolve_path(config_file: Option<&Path>) -> PathBuf {
        config_file.map_or_else(Self::config_path, Path::to_path_buf)
    }

    /// Look up a dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            "shell.prompt" => Some(self.shell.prompt.clone()),
            "shell.date_format" => Some(self.shell.date_format.clone()),
            _ => None,
        }
    }

    /// Every dotted key understood by [`Self::get`].
    pub const KEYS: [&'static str; 4] = [
        "output.no_color",
        "output.format",
        "shell.prompt",
        "shell.date_format",
    ];

    fn check(&self) -> anyhow::Result<()> {
        if StrftimeItems::new(&self.shell.date_format).any(|item| matches!(item, Item::Error)) {
            bail!(
                "shell.date_format '{}' is not a valid strftime pattern",
                self.shell.date_format
            );
        }
        Ok(())
    }
}
