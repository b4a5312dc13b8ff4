use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the property table
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// JSON array of canonical location names (label encoder classes).
    /// Falls back to the locations found in the dataset when unset.
    #[serde(default)]
    pub locations_path: Option<String>,

    /// JSON file holding a linear demand model. Heuristic scoring when unset.
    #[serde(default)]
    pub model_path: Option<String>,

    /// Allow browser clients from any origin
    #[serde(default = "default_cors_allow_any_origin")]
    pub cors_allow_any_origin: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_dataset_path() -> String {
    "housing_data/properties.json".to_string()
}

fn default_cors_allow_any_origin() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.dataset_path, "housing_data/properties.json");
        assert!(config.locations_path.is_none());
        assert!(config.model_path.is_none());
        assert!(config.cors_allow_any_origin);
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("PORT".to_string(), "9100".to_string()),
            ("MODEL_PATH".to_string(), "model.json".to_string()),
            ("CORS_ALLOW_ANY_ORIGIN".to_string(), "false".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.model_path.as_deref(), Some("model.json"));
        assert!(!config.cors_allow_any_origin);
    }
}
