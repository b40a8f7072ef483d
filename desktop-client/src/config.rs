use common::config::{ConfigManager, Validate};
use common::validation::validate_player_name;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "snake_scores_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<ClientConfig> {
    ConfigManager::from_yaml_file(&get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub server_address: String,
    pub player_name: String,
    pub tick_interval_ms: u64,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if self.server_address.trim().is_empty() {
            return Err("Server address must not be empty".to_string());
        }
        validate_player_name(&self.player_name)?;
        if self.tick_interval_ms < 50 || self.tick_interval_ms > 5000 {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_address: "http://127.0.0.1:5000".to_string(),
            player_name: "Player".to_string(),
            tick_interval_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!(
            "temp_snake_scores_client_config_{}.yaml",
            random_number
        ));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_config_roundtrip_through_manager() {
        let config = ClientConfig {
            player_name: "Tester".to_string(),
            ..ClientConfig::default()
        };
        let manager: ConfigManager<ClientConfig> =
            ConfigManager::from_yaml_file(&get_temp_file_path());
        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager: ConfigManager<ClientConfig> =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let path = get_temp_file_path();
        std::fs::write(
            &path,
            "server_address: ''\nplayer_name: ''\ntick_interval_ms: 10\n",
        )
        .unwrap();
        let manager: ConfigManager<ClientConfig> = ConfigManager::from_yaml_file(&path);
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_invalid_config_cant_be_saved() {
        let config = ClientConfig {
            tick_interval_ms: 10,
            ..ClientConfig::default()
        };
        let manager: ConfigManager<ClientConfig> =
            ConfigManager::from_yaml_file(&get_temp_file_path());
        assert!(manager.set_config(&config).is_err());
    }
}
