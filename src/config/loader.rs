//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{ConfigFile, RunConfig};
use crate::error::{LastRunError, Result};

/// Config file name looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "lastrun.yml";

/// Path of the default config file for a project root.
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(DEFAULT_CONFIG_FILE)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LastRunError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LastRunError::io(path, e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ConfigFile`].
///
/// An empty document yields the default (no projects, no override).
pub fn parse_config(content: &str, source_path: &Path) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(content).map_err(|e| LastRunError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the run configuration for a project.
///
/// With `config_override`, that file must exist. Otherwise `lastrun.yml` in
/// `project_root` is used when present, and an empty configuration when not.
/// Relative paths inside the file resolve against the file's directory.
pub fn load_run_config(project_root: &Path, config_override: Option<&Path>) -> Result<RunConfig> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_config_path(project_root);
            if !path.exists() {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Ok(RunConfig::from_file(ConfigFile::default(), project_root));
            }
            path
        }
    };

    let file = load_config_file(&path)?;
    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_root.to_path_buf());

    tracing::debug!(
        "Loaded config from {} ({} projects)",
        path.display(),
        file.projects.len()
    );

    Ok(RunConfig::from_file(file, &base_dir))
}
