use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::config::{CompareConfig, LogConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub logs: LogConfig,

    #[serde(default)]
    pub compare: CompareConfig,
}

fn get_env_file_name() -> String {
    if let Ok(env_file) = std::env::var("SEMDIFF_ENV_FILE") {
        return env_file;
    }
    if let Ok(env) = std::env::var("SEMDIFF_ENV") {
        return match env.to_lowercase().as_str() {
            "dev" => ".env.dev".to_string(),
            "test" => ".env.test".to_string(),
            _ => ".env".to_string(),
        };
    }
    ".env".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file chosen by `SEMDIFF_ENV` / `SEMDIFF_ENV_FILE`
        dotenvy::from_filename(get_env_file_name()).ok();

        let settings = Config::builder()
            .add_source(
                Environment::with_prefix("SEMDIFF")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn print_config(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to serialize settings: {}", err),
        }
    }
}
