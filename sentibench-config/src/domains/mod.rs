//! Domain-specific configuration modules

pub mod http;
pub mod load;
pub mod logging;
pub mod service;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Sentibench configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SentibenchConfig {
    /// HTTP client configuration
    #[serde(default)]
    pub http: http::HttpConfig,

    /// Sentiment service endpoint configuration
    #[serde(default)]
    pub service: service::ServiceConfig,

    /// Load generator configuration
    #[serde(default)]
    pub load: load::LoadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl SentibenchConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.http.validate()?;
        self.service.validate()?;
        self.load.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = SentibenchConfig::default();
        serde_yaml::to_string(&config).unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
