//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/crumbs/crumbs.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `CRUMBS_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, RenderConfig, DEFAULT_WRAP_LIMIT};
use crate::domain::{ParserOptions, DEFAULT_ID_SEED, DEFAULT_MARKER};
use crate::infrastructure::input::MAX_INPUT_BYTES;

/// Unified configuration for crumbs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Label wrap width in characters, 0 disables wrapping (default: 28)
    pub wrap_limit: usize,
    /// Top to bottom layout (default: left to right)
    pub vertical: bool,
    /// Folder in which to look for icon files (default: "./")
    pub images_path: String,
    /// Graphviz `imagepath`: directories searched for images at render time
    pub search_path: Option<String>,
    /// Depth marker character (default: '*')
    pub marker: char,
    /// Input size cap in bytes (default: 512000)
    pub max_input_bytes: u64,
    /// Seed for entry identifiers
    pub id_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wrap_limit: DEFAULT_WRAP_LIMIT,
            vertical: false,
            images_path: "./".into(),
            search_path: None,
            marker: DEFAULT_MARKER,
            max_input_bytes: MAX_INPUT_BYTES,
            id_seed: DEFAULT_ID_SEED,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub wrap_limit: Option<usize>,
    pub vertical: Option<bool>,
    pub images_path: Option<String>,
    pub search_path: Option<String>,
    pub marker: Option<char>,
    pub max_input_bytes: Option<u64>,
    pub id_seed: Option<u64>,
}

/// Get the XDG config directory for crumbs.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "crumbs").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("crumbs.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input alone if expansion fails.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            wrap_limit: overlay.wrap_limit.unwrap_or(self.wrap_limit),
            vertical: overlay.vertical.unwrap_or(self.vertical),
            images_path: overlay
                .images_path
                .clone()
                .unwrap_or_else(|| self.images_path.clone()),
            search_path: overlay
                .search_path
                .clone()
                .or_else(|| self.search_path.clone()),
            marker: overlay.marker.unwrap_or(self.marker),
            max_input_bytes: overlay.max_input_bytes.unwrap_or(self.max_input_bytes),
            id_seed: overlay.id_seed.unwrap_or(self.id_seed),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> ApplicationResult<Self> {
        Self::load_from(
            global_config_path().as_deref(),
            config_file,
            Self::env_source(),
        )
    }

    /// Load settings from explicit sources.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_from(
        global: Option<&Path>,
        config_file: Option<&Path>,
        env: Environment,
    ) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = current.apply_env_overrides(env)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// `CRUMBS_*` environment variables, e.g. `CRUMBS_WRAP_LIMIT=40`.
    pub fn env_source() -> Environment {
        Environment::with_prefix("CRUMBS")
            .prefix_separator("_")
            .separator("__")
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(mut self, env: Environment) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_int("wrap_limit"))? {
            self.wrap_limit = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("wrap_limit must not be negative, got {}", val),
            })?;
        }
        if let Some(val) = optional(config.get_bool("vertical"))? {
            self.vertical = val;
        }
        if let Some(val) = optional(config.get_string("images_path"))? {
            self.images_path = val;
        }
        if let Some(val) = optional(config.get_string("search_path"))? {
            self.search_path = Some(val);
        }
        if let Some(val) = optional(config.get_string("marker"))? {
            let mut chars = val.chars();
            self.marker = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ApplicationError::Config {
                        message: format!("marker must be a single character, got {:?}", val),
                    })
                }
            };
        }
        if let Some(val) = optional(config.get_int("max_input_bytes"))? {
            self.max_input_bytes = u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("max_input_bytes must not be negative, got {}", val),
            })?;
        }
        if let Some(val) = optional(config.get_int("id_seed"))? {
            self.id_seed = u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("id_seed must not be negative, got {}", val),
            })?;
        }

        Ok(self)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.images_path = expand_env_vars(&self.images_path);
        self.search_path = self.search_path.as_deref().map(expand_env_vars);
    }

    fn validate(&self) -> ApplicationResult<()> {
        if self.marker.is_whitespace() {
            return Err(ApplicationError::Config {
                message: "marker must not be whitespace".to_string(),
            });
        }
        Ok(())
    }

    /// Parser options derived from these settings.
    pub fn parser_options(&self) -> ParserOptions {
        let icons_path = Some(self.images_path.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        ParserOptions {
            icons_path,
            marker: self.marker,
            id_seed: self.id_seed,
        }
    }

    /// Render options derived from these settings.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            vertical_layout: self.vertical,
            wrap_text_limit: self.wrap_limit,
            images_path: self.search_path.clone(),
        }
    }
}

/// Treat a missing key as "not set", anything else as an error.
fn optional<T>(result: Result<T, ConfigError>) -> ApplicationResult<Option<T>> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
