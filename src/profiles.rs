//! Configuration profile persistence
//!
//! Save/load/list/delete configuration profiles as pretty JSON files in a
//! caller-chosen directory, one `<name>.json` per profile.

use std::path::{Path, PathBuf};

use crate::domain::{Configuration, RadioError, RadioResult};

/// Name of the profile that always exists and cannot be deleted
pub const DEFAULT_PROFILE: &str = "Default";

fn config_err(msg: String) -> RadioError {
    log::error!("[profiles] {msg}");
    RadioError::Config(msg)
}

/// Reject empty names and anything that could escape the profile directory.
fn sanitize_name(name: &str) -> RadioResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(config_err("Configuration name cannot be empty".to_string()));
    }
    if trimmed.contains("..") || trimmed.contains('/') || trimmed.contains('\\') {
        return Err(config_err("Invalid configuration name".to_string()));
    }
    // Only allow alphanumeric, spaces, hyphens, underscores
    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(config_err("Configuration name contains invalid characters".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Create the directory if needed and return the profile's path.
fn profile_path(dir: &Path, name: &str) -> RadioResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| config_err(format!("Failed to create configs dir: {e}")))?;
    Ok(dir.join(format!("{name}.json")))
}

pub fn save(dir: &Path, config: &Configuration) -> RadioResult<()> {
    let name = sanitize_name(&config.name)?;
    let path = profile_path(dir, &name)?;
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| config_err(format!("Serialization error: {e}")))?;
    std::fs::write(&path, json).map_err(|e| config_err(format!("Failed to write config: {e}")))?;
    log::info!("[profiles] saved '{name}' to {}", path.display());
    Ok(())
}

/// Load a profile. A missing `Default` profile yields the built-in defaults.
pub fn load(dir: &Path, name: &str) -> RadioResult<Configuration> {
    let name = sanitize_name(name)?;
    let path = dir.join(format!("{name}.json"));
    if name == DEFAULT_PROFILE && !path.exists() {
        return Ok(Configuration::default());
    }
    let json = std::fs::read_to_string(&path)
        .map_err(|e| config_err(format!("Failed to read config '{name}': {e}")))?;
    serde_json::from_str(&json).map_err(|e| config_err(format!("Failed to parse config '{name}': {e}")))
}

/// Profile names in the directory, sorted.
pub fn list(dir: &Path) -> RadioResult<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map_err(|e| config_err(format!("Failed to read configs dir: {e}")))?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension()?.to_str()? == "json" {
                path.file_stem()?.to_str().map(String::from)
            } else {
                None
            }
        })
        .collect();
    names.sort();
    Ok(names)
}

pub fn delete(dir: &Path, name: &str) -> RadioResult<()> {
    let name = sanitize_name(name)?;
    if name == DEFAULT_PROFILE {
        return Err(config_err("Cannot delete the Default configuration".to_string()));
    }
    let path = dir.join(format!("{name}.json"));
    if !path.exists() {
        return Err(config_err(format!("Configuration '{name}' not found")));
    }
    std::fs::remove_file(&path).map_err(|e| config_err(format!("Failed to delete config '{name}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_name_rejects_path_traversal() {
        assert!(sanitize_name("../evil").is_err());
        assert!(sanitize_name("foo/bar").is_err());
        assert!(sanitize_name("foo\\bar").is_err());
        assert!(sanitize_name("").is_err());
        assert!(sanitize_name("  ").is_err());
    }

    #[test]
    fn sanitize_name_accepts_valid_names() {
        assert_eq!(sanitize_name("Default").unwrap(), "Default");
        assert_eq!(sanitize_name("Car Radio").unwrap(), "Car Radio");
        assert_eq!(sanitize_name("kitchen_2").unwrap(), "kitchen_2");
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration {
            name: "Car".to_string(),
            initial_frequency_khz: 96_500,
            stations_khz: vec![96_500, 101_300],
            ..Configuration::default()
        };
        save(dir.path(), &config).unwrap();
        assert_eq!(load(dir.path(), "Car").unwrap(), config);
    }

    #[test]
    fn list_returns_sorted_json_stems() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Zeta", "Alpha"] {
            let config = Configuration { name: name.to_string(), ..Configuration::default() };
            save(dir.path(), &config).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        assert_eq!(list(dir.path()).unwrap(), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn missing_default_loads_builtin() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path(), DEFAULT_PROFILE).unwrap(), Configuration::default());
        assert!(load(dir.path(), "Nope").is_err());
    }

    #[test]
    fn delete_removes_profile_but_protects_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration { name: "Temp".to_string(), ..Configuration::default() };
        save(dir.path(), &config).unwrap();
        delete(dir.path(), "Temp").unwrap();
        assert!(list(dir.path()).unwrap().is_empty());

        assert!(matches!(delete(dir.path(), DEFAULT_PROFILE), Err(RadioError::Config(_))));
        assert!(delete(dir.path(), "Temp").is_err());
    }
}
