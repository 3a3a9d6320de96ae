use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::affirmation::{AffirmationClient, DEFAULT_AFFIRMATION_URL};

pub const CONFIG_FILE: &str = "config.json";
pub const AFFIRMATION_URL_ENV: &str = "POSY_AFFIRMATION_URL";

fn default_affirmation_url() -> String {
    DEFAULT_AFFIRMATION_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default = "default_affirmation_url")]
    pub affirmation_url: String,
    #[serde(default = "default_timeout_secs")]
    pub affirmation_timeout_secs: u64,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("posy")
        });

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let config_path = data_dir.join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            let config_str =
                std::fs::read_to_string(&config_path).context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                warn!(path = %config_path.display(), "config file is empty, using defaults");
                Self::default_config(data_dir.clone())
            } else {
                match serde_json::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        config.data_dir = data_dir.clone();
                        config
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            path = %config_path.display(),
                            "failed to parse config.json, using defaults"
                        );
                        Self::default_config(data_dir.clone())
                    }
                }
            }
        } else {
            let config = Self::default_config(data_dir.clone());
            config.save()?;
            config
        };

        if let Ok(url) = std::env::var(AFFIRMATION_URL_ENV) {
            if !url.trim().is_empty() {
                config.affirmation_url = url;
            }
        }

        debug!(
            data_dir = %config.data_dir.display(),
            url = %config.affirmation_url,
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.data_dir.join(CONFIG_FILE);
        let json_str = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str).context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            affirmation_url: default_affirmation_url(),
            affirmation_timeout_secs: default_timeout_secs(),
        }
    }

    pub fn affirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.affirmation_timeout_secs)
    }

    pub fn affirmation_client(&self) -> AffirmationClient {
        AffirmationClient::new(self.affirmation_url.clone(), self.affirmation_timeout())
    }
}
