use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub etherscan_api_key: Option<String>,
    pub http_bind_addr: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing ETHERSCAN_API_KEY env var")]
    MissingEtherscanApiKey,
}

impl Config {
    pub fn from_env() -> Self {
        let etherscan_api_key = env::var("ETHERSCAN_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let http_bind_addr = env::var("HTTP_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        Self {
            etherscan_api_key,
            http_bind_addr,
        }
    }

    /// The explorer key is only demanded by paths that query Etherscan;
    /// price and registry lookups work without one.
    pub fn require_etherscan_api_key(&self) -> Result<&str, ConfigError> {
        self.etherscan_api_key
            .as_deref()
            .ok_or(ConfigError::MissingEtherscanApiKey)
    }
}
