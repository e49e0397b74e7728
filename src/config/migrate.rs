use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys present in a default configuration but missing from `current`.
fn missing_keys(current: &Mapping, defaults: &Mapping) -> Vec<String> {
    defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect()
}

/// Compare the config file with the current field set.
///
/// Missing fields are filled with their default value and the file is
/// rewritten, keeping every value the user already set.
/// Returns the names of the fields that were added.
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<String>> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let mut yaml: Value = serde_yaml::from_str(&content)?;

    let current = yaml
        .as_mapping_mut()
        .ok_or_else(|| AppError::Config("configuration root must be a mapping".into()))?;

    let defaults = serde_yaml::to_value(Config::default())?;
    let Some(defaults) = defaults.as_mapping() else {
        return Ok(Vec::new());
    };

    let missing = missing_keys(current, defaults);
    if missing.is_empty() {
        return Ok(missing);
    }

    for key in &missing {
        let k = Value::String(key.clone());
        if let Some(v) = defaults.get(&k) {
            current.insert(k, v.clone());
        }
    }

    let serialized = serde_yaml::to_string(&yaml)?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    Ok(missing)
}
