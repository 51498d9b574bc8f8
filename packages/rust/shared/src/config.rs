//! Application configuration for adrindex.
//!
//! A project config lives at `./adrindex.toml`; a user-wide fallback lives at
//! `~/.adrindex/adrindex.toml`. CLI flags override config file values, which
//! override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AdrIndexError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "adrindex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".adrindex";

// ---------------------------------------------------------------------------
// Config structs (matching adrindex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Corpus and layout settings.
    #[serde(default)]
    pub index: IndexConfig,
}

/// `[index]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory scanned for ADR documents.
    #[serde(default = "default_adr_dir")]
    pub adr_dir: PathBuf,

    /// File extension (without the dot) of eligible documents.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Separator between the sequence number and the rest of the file stem.
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Layout file. The built-in layout is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            adr_dir: default_adr_dir(),
            extension: default_extension(),
            separator: default_separator(),
            template: None,
        }
    }
}

fn default_adr_dir() -> PathBuf {
    PathBuf::from("adr")
}
fn default_extension() -> String {
    "adoc".into()
}
fn default_separator() -> char {
    '-'
}

impl IndexConfig {
    /// Reject settings that would make discovery or sequence parsing meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(AdrIndexError::config(format!(
                "extension must be non-empty and given without a leading dot, got {:?}",
                self.extension
            )));
        }
        if self.separator.is_ascii_digit() || self.separator.is_whitespace() {
            return Err(AdrIndexError::config(format!(
                "separator {:?} cannot be a digit or whitespace",
                self.separator
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user config directory (`~/.adrindex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AdrIndexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user config file (`~/.adrindex/adrindex.toml`).
pub fn user_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the config: `./adrindex.toml`, then the user file, then defaults.
pub fn load_config() -> Result<AppConfig> {
    let project = PathBuf::from(CONFIG_FILE_NAME);
    if project.is_file() {
        return load_config_from(&project);
    }

    // A missing home directory only means there is no user config.
    match user_config_path() {
        Ok(path) if path.is_file() => load_config_from(&path),
        _ => {
            tracing::debug!("no config file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AdrIndexError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        AdrIndexError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.index.validate()?;

    tracing::debug!(?path, "loaded config");
    Ok(config)
}

/// Write a default config file into `dir`. Returns the path to the created file.
///
/// An existing file is left untouched and reported as an error.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(AdrIndexError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = to_toml(&AppConfig::default())?;
    std::fs::write(&path, content).map_err(|e| AdrIndexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Serialize a config as pretty TOML.
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| AdrIndexError::config(e.to_string()))
}
