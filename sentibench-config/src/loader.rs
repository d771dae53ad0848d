//! Configuration loading and environment variable handling

use crate::domains::SentibenchConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "SENTIBENCH".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SentibenchConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SentibenchConfig = serde_yaml::from_str(&content)?;

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config)?;

        // Validate all domains
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<SentibenchConfig> {
        let mut config = SentibenchConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SentibenchConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut SentibenchConfig) -> ConfigResult<()> {
        self.apply_http_overrides(&mut config.http)?;
        self.apply_service_overrides(&mut config.service)?;
        self.apply_load_overrides(&mut config.load)?;
        self.apply_logging_overrides(&mut config.logging)?;

        Ok(())
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(
        &self,
        config: &mut crate::domains::http::HttpConfig,
    ) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(verify_ssl) = self.get_env_var("HTTP_VERIFY_SSL") {
            config.verify_ssl = verify_ssl
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_VERIFY_SSL: {}", e)))?;
        }

        Ok(())
    }

    /// Apply service endpoint overrides
    fn apply_service_overrides(
        &self,
        config: &mut crate::domains::service::ServiceConfig,
    ) -> ConfigResult<()> {
        if let Ok(base_url) = self.get_env_var("TARGET_URL") {
            config.base_url = base_url;
        }

        Ok(())
    }

    /// Apply load generator overrides
    fn apply_load_overrides(
        &self,
        config: &mut crate::domains::load::LoadConfig,
    ) -> ConfigResult<()> {
        if let Ok(rate) = self.get_env_var("LOG_SAMPLE_RATE") {
            config.log_sample_rate = rate
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid LOG_SAMPLE_RATE: {}", e)))?;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            use std::str::FromStr;
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            use std::str::FromStr;
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Each test uses its own prefix so parallel tests cannot observe each
    // other's environment mutations.

    #[test]
    fn test_from_env_defaults() {
        let loader = ConfigLoader::with_prefix("SB_TEST_DEFAULTS");
        let config = loader.from_env().unwrap();
        assert_eq!(config.service.base_url, "http://api.sentiment-analyzer.local");
    }

    #[test]
    fn test_env_overrides_applied() {
        std::env::set_var("SB_TEST_OVR_TARGET_URL", "http://localhost:9000");
        std::env::set_var("SB_TEST_OVR_HTTP_TIMEOUT", "5");
        std::env::set_var("SB_TEST_OVR_LOG_LEVEL", "debug");

        let loader = ConfigLoader::with_prefix("SB_TEST_OVR");
        let config = loader.from_env().unwrap();

        assert_eq!(config.service.base_url, "http://localhost:9000");
        assert_eq!(config.http.timeout, std::time::Duration::from_secs(5));
        assert_eq!(
            config.logging.level,
            crate::domains::logging::LogLevel::Debug
        );

        std::env::remove_var("SB_TEST_OVR_TARGET_URL");
        std::env::remove_var("SB_TEST_OVR_HTTP_TIMEOUT");
        std::env::remove_var("SB_TEST_OVR_LOG_LEVEL");
    }

    #[test]
    fn test_invalid_env_value_rejected() {
        std::env::set_var("SB_TEST_BAD_HTTP_TIMEOUT", "not-a-number");

        let loader = ConfigLoader::with_prefix("SB_TEST_BAD");
        let result = loader.from_env();
        assert!(matches!(result, Err(ConfigError::EnvError(_))));

        std::env::remove_var("SB_TEST_BAD_HTTP_TIMEOUT");
    }

    #[test]
    fn test_from_file_with_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "service:\n  base_url: http://file-configured:8080\nhttp:\n  timeout: 10"
        )
        .unwrap();

        std::env::set_var("SB_TEST_FILE_HTTP_USER_AGENT", "override-agent");

        let loader = ConfigLoader::with_prefix("SB_TEST_FILE");
        let config = loader.from_file(file.path()).unwrap();

        assert_eq!(config.service.base_url, "http://file-configured:8080");
        assert_eq!(config.http.timeout, std::time::Duration::from_secs(10));
        assert_eq!(config.http.user_agent, "override-agent");

        std::env::remove_var("SB_TEST_FILE_HTTP_USER_AGENT");
    }

    #[test]
    fn test_from_file_missing() {
        let loader = ConfigLoader::with_prefix("SB_TEST_MISSING");
        assert!(matches!(
            loader.from_file("/nonexistent/sentibench.yaml"),
            Err(ConfigError::FileReadError(_))
        ));
    }
}
