//! Configuration loading
//!
//! Values come from `~/.timeline/config.yaml` when it exists, then
//! environment variables override individual fields.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_BASE, ENV_API_BASE, ENV_LOG_DIR,
    ENV_SESSION_FILE, SESSION_FILE_NAME,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Prefix for every API path, e.g. `http://localhost:3000`
    pub api_base: String,
    /// Durable home of the session token
    pub session_file: PathBuf,
    /// Directory the log file is written to
    pub log_dir: PathBuf,
}

/// On-disk shape; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_base: Option<String>,
    session_file: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let dir = config_dir();
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            session_file: dir.join(SESSION_FILE_NAME),
            log_dir: dir,
        }
    }
}

impl Config {
    /// Load from the default location with environment overrides
    pub fn load() -> Result<Self> {
        let path = config_dir().join(CONFIG_FILE_NAME);
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        // An empty YAML document deserializes as unit, not a map
        if content.trim().is_empty() {
            return Ok(config);
        }
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;

        if let Some(base) = file.api_base {
            config.api_base = base;
        }
        if let Some(session_file) = file.session_file {
            config.session_file = session_file;
        }
        if let Some(log_dir) = file.log_dir {
            config.log_dir = log_dir;
        }
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE) {
            self.api_base = base;
        }
        if let Some(path) = lookup(ENV_SESSION_FILE) {
            self.session_file = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log_dir = PathBuf::from(dir);
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_file_values_then_env_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api_base: http://10.0.0.5:3000\nsession_file: /tmp/tl-session\n",
        )
        .unwrap();

        let mut config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base, "http://10.0.0.5:3000");
        assert_eq!(config.session_file, PathBuf::from("/tmp/tl-session"));

        let env: HashMap<&str, &str> = [(ENV_API_BASE, "https://timeline.example")].into();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base, "https://timeline.example");
        assert_eq!(config.session_file, PathBuf::from("/tmp/tl-session"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_base: [unclosed").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
