use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatasetConfig {
    /// Dataset file; the bundled data is used when unset
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl DatasetConfig {
    pub fn open(&self) -> Result<Dataset> {
        match &self.path {
            Some(path) => Dataset::load(path),
            None => Dataset::bundled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:3000");
        assert!(config.dataset.path.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [server]
            listen = "127.0.0.1:8080"

            [dataset]
            path = "data/automaatit.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:8080");
        assert_eq!(
            config.dataset.path,
            Some(PathBuf::from("data/automaatit.json"))
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otto.toml");
        fs::write(&path, "[server]\nlisten = \"127.0.0.1:9000\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:9000");
        assert!(config.dataset.open().unwrap().len() > 0);
    }

    #[test]
    fn test_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otto.toml");
        fs::write(&path, "[server\n").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }
}
