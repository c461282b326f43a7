// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Config command - get or set persisted settings

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::{load_file, parse_status_order, save_file, Config};
use crate::types::SortKey;

const VALID_KEYS: &str = "data_dir, default_sort, status_order";

/// Run the config command
pub fn run(config: &Config, key: &str, value: Option<String>) -> Result<()> {
    match value {
        Some(value) => set(config, key, &value),
        None => get(config, key),
    }
}

/// Print the effective value of one key
fn get(config: &Config, key: &str) -> Result<()> {
    match key {
        "data_dir" => println!("{}", config.data_dir.display()),
        "default_sort" => println!("{}", config.default_sort.code()),
        "status_order" => {
            let names: Vec<&str> = config.status_order.iter().map(|s| s.code()).collect();
            println!("{}", names.join(","));
        }
        _ => anyhow::bail!("Unknown config key: {key}. Valid: {VALID_KEYS}"),
    }
    Ok(())
}

/// Validate a value and persist it to the config file
fn set(config: &Config, key: &str, value: &str) -> Result<()> {
    let mut file = load_file(&config.config_path)?;

    match key {
        "data_dir" => {
            file.data_dir = Some(PathBuf::from(value));
        }
        "default_sort" => {
            let sort = SortKey::parse(value).ok_or_else(|| {
                anyhow::anyhow!("invalid default_sort '{value}' (valid: status, title, author)")
            })?;
            file.default_sort = Some(sort.code().to_string());
        }
        "status_order" => {
            let names: Vec<String> = value.split(',').map(|s| s.trim().to_string()).collect();
            let order = parse_status_order(&names)?;
            file.status_order = Some(order.iter().map(|s| s.code().to_string()).collect());
        }
        _ => anyhow::bail!("Unknown config key: {key}. Valid: {VALID_KEYS}"),
    }

    save_file(&config.config_path, &file)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))?;
    println!("Set {key} = {value}");
    Ok(())
}
