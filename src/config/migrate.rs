//! Configuration file upgrades: keys added by newer releases are filled
//! in with their defaults, existing values are never overwritten.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys present in `Config::default()` but missing from the YAML mapping.
fn missing_keys(current: &Mapping, defaults: &Mapping) -> Vec<(Value, Value)> {
    defaults
        .iter()
        .filter(|(k, _)| !current.contains_key(*k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Report (and optionally write) the keys missing from the config file.
/// Returns the names of the keys that were missing.
pub fn check_config_file(path: &Path, fix: bool) -> AppResult<Vec<String>> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "configuration file not found: {} (run `paintledger init`)",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let mut yaml: Value = serde_yaml::from_str(&content)?;
    let defaults = serde_yaml::to_value(Config::default())?;

    let (Some(map), Some(default_map)) = (yaml.as_mapping_mut(), defaults.as_mapping()) else {
        return Err(AppError::Config("configuration file is not a YAML mapping".into()));
    };

    let missing = missing_keys(map, default_map);
    let names: Vec<String> = missing
        .iter()
        .filter_map(|(k, _)| k.as_str().map(str::to_string))
        .collect();

    if missing.is_empty() {
        info("Configuration file is complete.");
        return Ok(names);
    }

    for name in &names {
        info(format!("Missing configuration key: {name}"));
    }

    if fix {
        for (k, v) in missing {
            map.insert(k, v);
        }
        fs::write(path, serde_yaml::to_string(&yaml)?)?;
        success(format!("Added {} missing key(s) to {}", names.len(), path.display()));
    }

    Ok(names)
}
