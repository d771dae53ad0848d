//! Sentiment service endpoint configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};

/// Remote sentiment-analysis service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the sentiment service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the analyze endpoint, relative to the base URL
    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,

    /// Path of the health endpoint, relative to the base URL
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            analyze_path: default_analyze_path(),
            health_path: default_health_path(),
        }
    }
}

impl ServiceConfig {
    /// Full URL of the analyze endpoint
    pub fn analyze_url(&self) -> String {
        join_url(&self.base_url, &self.analyze_path)
    }

    /// Full URL of the health endpoint
    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

impl Validatable for ServiceConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.base_url, "base_url", self.domain_name())?;
        validate_required_string(&self.analyze_path, "analyze_path", self.domain_name())?;
        validate_required_string(&self.health_path, "health_path", self.domain_name())?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "service"
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://api.sentiment-analyzer.local".to_string()
}

fn default_analyze_path() -> String {
    "/analyze".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://api.sentiment-analyzer.local");
        assert_eq!(
            config.analyze_url(),
            "http://api.sentiment-analyzer.local/analyze"
        );
        assert_eq!(
            config.health_url(),
            "http://api.sentiment-analyzer.local/health"
        );
    }

    #[test]
    fn test_url_join_handles_slashes() {
        let config = ServiceConfig {
            base_url: "http://localhost:8000/".to_string(),
            analyze_path: "analyze".to_string(),
            health_path: "/health".to_string(),
        };
        assert_eq!(config.analyze_url(), "http://localhost:8000/analyze");
        assert_eq!(config.health_url(), "http://localhost:8000/health");
    }

    #[test]
    fn test_service_config_validation() {
        let mut config = ServiceConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config = ServiceConfig::default();
        config.analyze_path = String::new();
        assert!(config.validate().is_err());
    }
}
