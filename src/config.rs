use std::path::PathBuf;

use serde::Deserialize;
use solar_yield_estimator::models::estimate::SystemParameters;

fn default_port() -> u16 { 8080 }
fn default_dataset_path() -> PathBuf { PathBuf::from("radiation.csv") }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    /// Parameters used for fields an estimate request leaves out.
    #[serde(default)]
    pub defaults: SystemParameters,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.defaults.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"server": {}, "dataset": {}}"#).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.dataset.path, PathBuf::from("radiation.csv"));
        assert_eq!(cfg.defaults, SystemParameters::default());
    }

    #[test]
    fn test_invalid_defaults_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"server": {"port": 9000}, "dataset": {"path": "data/radiation.csv"}, "defaults": {"performance_ratio": 1.5}}"#,
        )
        .unwrap();
        assert!(Config::load(path.to_str().unwrap()).is_err());
    }
}
