use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL. The in-memory store is used when unset.
    #[serde(default)]
    pub database_url: Option<String>,

    /// OpenAI API key. Recommendations fall back to built-in suggestions when unset.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat completion model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Upper bound on a single completion call, in seconds
    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,

    #[serde(default = "default_ai_max_tokens")]
    pub ai_max_tokens: u32,

    #[serde(default = "default_ai_temperature")]
    pub ai_temperature: f32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_ai_timeout_secs() -> u64 {
    10
}

fn default_ai_max_tokens() -> u32 {
    1500
}

fn default_ai_temperature() -> f32 {
    0.8
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, if one is configured and non-blank
    pub fn ai_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// The database URL, if one is configured and non-blank
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        Config {
            database_url: None,
            openai_api_key: key.map(str::to_string),
            openai_api_url: default_openai_api_url(),
            openai_model: default_openai_model(),
            ai_timeout_secs: default_ai_timeout_secs(),
            ai_max_tokens: default_ai_max_tokens(),
            ai_temperature: default_ai_temperature(),
            host: default_host(),
            port: default_port(),
        }
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        assert_eq!(config_with_key(None).ai_api_key(), None);
        assert_eq!(config_with_key(Some("   ")).ai_api_key(), None);
        assert_eq!(config_with_key(Some(" sk-test ")).ai_api_key(), Some("sk-test"));
    }

    #[test]
    fn test_blank_database_url_selects_memory_store() {
        let mut config = config_with_key(None);
        assert_eq!(config.database_url(), None);

        config.database_url = Some("".to_string());
        assert_eq!(config.database_url(), None);

        config.database_url = Some("  ".to_string());
        assert_eq!(config.database_url(), None);

        config.database_url = Some("postgres://localhost/recipes".to_string());
        assert_eq!(config.database_url(), Some("postgres://localhost/recipes"));
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(config_with_key(None).bind_address(), "0.0.0.0:8000");
    }
}
