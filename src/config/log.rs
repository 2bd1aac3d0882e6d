use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-level matcher output is noisy on large models, so it is capped at info
/// unless overridden through `ext_level`.
const MATCHER_TARGET: &str = "semdiff::compare::matcher";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_console_format")]
    pub console_format: String,

    #[serde(default)]
    pub file_enabled: bool,

    #[serde(
        default = "default_ext_level",
        deserialize_with = "deserialize_ext_level"
    )]
    pub ext_level: Option<HashMap<String, String>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: Some("./logs".to_string()),
            console_format: default_console_format(),
            file_enabled: false,
            ext_level: default_ext_level(),
        }
    }
}

impl LogConfig {
    /// The `EnvFilter` directive built from the base level and the overrides.
    pub fn filter_directive(&self) -> String {
        let mut filter_string = self.level.clone();
        if let Some(ext_levels) = &self.ext_level {
            let mut targets: Vec<_> = ext_levels.iter().collect();
            targets.sort();
            for (target, level) in targets {
                filter_string.push_str(&format!(",{}={}", target, level));
            }
        }
        filter_string
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_console_format() -> String {
    "pretty".to_string()
}

fn default_ext_level() -> Option<HashMap<String, String>> {
    let mut map = HashMap::new();
    map.insert(MATCHER_TARGET.to_string(), "info".to_string());
    Some(map)
}

fn deserialize_ext_level<'de, D>(
    deserializer: D,
) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;

    let mut map = default_ext_level().unwrap_or_default();

    if let Some(s) = s {
        for pair in s.split(',') {
            if let Some((key, value)) = pair.trim().rsplit_once(':') {
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    Ok(Some(map))
}
