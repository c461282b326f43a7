// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Configuration management
//!
//! Settings layer in the usual order: built-in defaults, then the
//! config file, then BOOKYARD_* environment variables, then flags.
//! The file is TOML and every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{SortKey, Status};

/// Raw config file contents (config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Directory for persistent data (library, genres)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Sort key used when `list` is given none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
    /// Shelf order for status sorting, all three statuses exactly once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_order: Option<Vec<String>>,
}

/// Effective application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the config file lives (or would live)
    pub config_path: PathBuf,
    /// Directory for persistent data
    pub data_dir: PathBuf,
    /// Sort key used when `list` is given none
    pub default_sort: SortKey,
    /// Shelf order for status sorting
    pub status_order: [Status; 3],
}

impl Config {
    /// Resolve the effective configuration
    ///
    /// `cli_config` and `cli_data_dir` come from the command line (or
    /// their environment fallbacks) and take precedence over the file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or holds an invalid sort key or status order.
    pub fn load(cli_config: Option<PathBuf>, cli_data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = cli_config.unwrap_or_else(default_config_path);
        let raw: FileConfig = config::Config::builder()
            .add_source(config::File::from(config_path.clone()).required(false))
            .add_source(config::Environment::with_prefix("BOOKYARD"))
            .build()
            .with_context(|| format!("Failed to read {}", config_path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let default_sort = match &raw.default_sort {
            Some(key) => SortKey::parse(key).ok_or_else(|| {
                anyhow!("invalid default_sort '{key}' (valid: status, title, author)")
            })?,
            None => SortKey::Status,
        };
        let status_order = match &raw.status_order {
            Some(names) => parse_status_order(names)?,
            None => Status::ALL,
        };
        let data_dir = cli_data_dir
            .or(raw.data_dir)
            .unwrap_or_else(default_data_dir);

        Ok(Self {
            config_path,
            data_dir,
            default_sort,
            status_order,
        })
    }
}

/// Parse a status order list, requiring a full permutation
///
/// # Errors
/// Returns an error unless all three statuses appear exactly once.
pub fn parse_status_order(names: &[String]) -> Result<[Status; 3]> {
    if names.len() != 3 {
        bail!("status_order must list all three statuses exactly once");
    }
    let mut order = [Status::OnShelf; 3];
    for (slot, name) in order.iter_mut().zip(names) {
        *slot = Status::parse(name)
            .ok_or_else(|| anyhow!("unknown status '{name}' in status_order"))?;
    }
    for status in Status::ALL {
        if !order.contains(&status) {
            bail!("status_order must include '{}'", status.code());
        }
    }
    Ok(order)
}

/// Read the raw config file, defaulting to empty if it does not exist
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write the raw config file, creating parent directories as needed
///
/// # Errors
/// Returns an error if the file cannot be serialized or written.
pub fn save_file(path: &Path, file: &FileConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(file).context("Failed to serialize config")?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Default data directory for the current platform
#[must_use]
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "bookyard", "bookyard")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/bookyard"))
}

/// Default config file path for the current platform
#[must_use]
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("org", "bookyard", "bookyard")
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.config/bookyard/config.toml"))
}
