use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// File-backed YAML config with an in-memory cache. A missing file yields
/// the default config; an unreadable or invalid one is an error.
pub struct ConfigManager<TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    file_path: String,
    cached: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut cached = self.cached.lock().unwrap();
        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let content = match std::fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TConfig::default()),
            Err(e) => {
                return Err(format!(
                    "Failed to read config file {}: {}",
                    self.file_path, e
                ));
            }
        };

        let config: TConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(&self.file_path, content).map_err(|e| {
            format!("Failed to write config file {}: {}", self.file_path, e)
        })?;

        *self.cached.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}
