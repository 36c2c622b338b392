//! Configuration management for roster.
//!
//! Loads configuration from ${ROSTER_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `[backend].url`.
pub const BACKEND_URL_ENV: &str = "SUPABASE_URL";

/// Environment variable overriding `[backend].anon_key`.
pub const ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Environment variable overriding `[log].level`.
pub const LOG_ENV: &str = "ROSTER_LOG";

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for roster configuration and data files.
    //!
    //! ROSTER_HOME resolution order:
    //! 1. ROSTER_HOME environment variable (if set)
    //! 2. ~/.config/roster (default)

    use std::path::PathBuf;

    /// Returns the roster home directory.
    pub fn roster_home() -> PathBuf {
        if let Ok(home) = std::env::var("ROSTER_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".roster"),
            |h| h.join(".config").join("roster"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        roster_home().join("config.toml")
    }

    /// Returns the default log file path.
    pub fn log_path() -> PathBuf {
        roster_home().join("roster.log")
    }
}

/// Backend service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the service (auth at `/auth/v1`, data at `/rest/v1`).
    pub url: String,
    /// Public anon key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,
    /// Collection holding the user records.
    pub table: String,
    /// Per-request timeout in seconds (0 disables).
    pub request_timeout_secs: u32,
}

impl BackendConfig {
    pub const DEFAULT_URL: &str = "http://127.0.0.1:54321";
    pub const DEFAULT_TABLE: &str = "users";

    /// Resolves the base URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the resolved URL is not well-formed.
    pub fn effective_url(&self) -> Result<String> {
        resolve_base_url(
            Some(&self.url),
            BACKEND_URL_ENV,
            Self::DEFAULT_URL,
        )
    }

    /// Resolves the anon key with precedence: env > config.
    ///
    /// # Errors
    /// Returns an error if no key is available.
    pub fn effective_anon_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(ANON_KEY_ENV) {
            let trimmed = key.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }

        self.anon_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .with_context(|| {
                format!("No anon key available. Set {ANON_KEY_ENV} or anon_key in [backend].")
            })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT_URL.to_string(),
            anon_key: None,
            table: Self::DEFAULT_TABLE.to_string(),
            request_timeout_secs: 0,
        }
    }
}

/// Resolves a base URL with precedence: env > config > default.
fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }
    }

    Ok(default_url.to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid backend URL: {url}"))?;
    Ok(())
}

/// TUI behavior configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show add/edit/delete failures in the footer notice line.
    pub surface_mutation_errors: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive (EnvFilter syntax).
    pub level: String,
    /// Log file path; relative paths resolve against ROSTER_HOME.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl LogConfig {
    /// Returns the log file path.
    pub fn effective_file(&self) -> PathBuf {
        match self.file.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(file) => {
                let path = PathBuf::from(file);
                if path.is_absolute() {
                    path
                } else {
                    paths::roster_home().join(path)
                }
            }
            None => paths::log_path(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    ///
    /// # Errors
    /// Returns an error if serialization or template parsing fails.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename).
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
