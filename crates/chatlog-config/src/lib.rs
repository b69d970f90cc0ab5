//! Configuration management for chatlog.
//!
//! Parses `chatlog.toml` with serde and discovers it in the current
//! directory or its parents. CLI settings can be applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [export]
//! dir = "slack-export"
//!
//! [render]
//! mention_href = "javascript:void(0)"
//! line_break = "<br/>"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `export.dir`
//! - `render.mention_href`

mod expand;

use std::path::{Path, PathBuf};

use chatlog_markup::{DEFAULT_LINE_BREAK, DEFAULT_MENTION_HREF, RenderOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override export directory.
    pub export_dir: Option<PathBuf>,
    /// Override mention anchor destination.
    pub mention_href: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "chatlog.toml";

/// Default export directory, relative to the config file.
const DEFAULT_EXPORT_DIR: &str = "export";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export location as written in TOML.
    export: ExportConfigRaw,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    dir: Option<String>,
}

/// Resolved export configuration with an absolute path.
#[derive(Debug, Default)]
pub struct ExportConfig {
    /// Unpacked workspace export directory.
    pub dir: PathBuf,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// `href` of user and channel mention anchors.
    pub mention_href: String,
    /// HTML emitted for line breaks.
    pub line_break: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mention_href: DEFAULT_MENTION_HREF.to_owned(),
            line_break: DEFAULT_LINE_BREAK.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`export.dir`").
        field: String,
        /// Error message (e.g., "${`CHATLOG_EXPORT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `chatlog.toml` in the current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or reading,
    /// expansion, parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Options for [`chatlog_markup::Renderer`].
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            mention_href: self.render.mention_href.clone(),
            line_break: self.render.line_break.clone(),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.mention_href, "render.mention_href")?;
        require_non_empty(&self.render.line_break, "render.line_break")?;
        if self.export_resolved.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("export.dir cannot be empty".to_owned()));
        }
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.export_dir {
            self.export_resolved.dir.clone_from(dir);
        }
        if let Some(href) = &settings.mention_href {
            self.render.mention_href.clone_from(href);
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            export: ExportConfigRaw::default(),
            render: RenderConfig::default(),
            export_resolved: ExportConfig {
                dir: base.join(DEFAULT_EXPORT_DIR),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.export.dir {
            self.export.dir = Some(expand::expand_env(dir, "export.dir")?);
        }
        self.render.mention_href =
            expand::expand_env(&self.render.mention_href, "render.mention_href")?;
        Ok(())
    }

    /// Resolve the export directory against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let dir = self.export.dir.as_deref().unwrap_or(DEFAULT_EXPORT_DIR);
        self.export_resolved = ExportConfig {
            dir: config_dir.join(dir),
        };
    }
}
