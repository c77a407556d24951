//! Server configuration from command line arguments and environment.

use clap::Parser;
use ppt_translate_client::provider::DEFAULT_ENDPOINT;
use ppt_translate_client::ProviderConfig;
use ppt_translate_core::types::DEFAULT_MAX_CHARS;
use ppt_translate_core::{Error, Result, TranslationOptions};

/// Serve PowerPoint translation over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "ppt-translate-server")]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "PPT_TRANSLATE_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on
    #[arg(short, long, env = "PPT_TRANSLATE_PORT", default_value_t = 8888)]
    pub port: u16,

    /// Translation provider endpoint
    #[arg(long, env = "PPT_TRANSLATE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Character budget per provider request
    #[arg(long, env = "PPT_TRANSLATE_MAX_CHARS", default_value_t = DEFAULT_MAX_CHARS)]
    pub max_chars: usize,

    /// Keep attributes of rewritten <a:t> tags
    #[arg(long, env = "PPT_TRANSLATE_PRESERVE_ATTRIBUTES")]
    pub preserve_run_attributes: bool,

    /// Largest accepted upload, in megabytes
    #[arg(long, env = "PPT_TRANSLATE_MAX_BODY_MB", default_value_t = 50)]
    pub max_body_mb: usize,
}

impl ServerConfig {
    /// `host:port` to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Upload limit in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb.saturating_mul(1024 * 1024)
    }

    /// Batching and rewriting options.
    pub fn translation_options(&self) -> TranslationOptions {
        TranslationOptions::new()
            .with_max_chars(self.max_chars)
            .with_preserve_run_attributes(self.preserve_run_attributes)
    }

    /// Provider settings.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new().with_endpoint(self.endpoint.clone())
    }

    /// Reject values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::ConfigError("max_chars must be positive".to_string()));
        }
        if self.max_body_mb == 0 {
            return Err(Error::ConfigError("max_body_mb must be positive".to_string()));
        }
        self.provider_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::parse_from(["ppt-translate-server"]);

        assert_eq!(config.address(), "127.0.0.1:8888");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.translation_options(), TranslationOptions::default());
        assert_eq!(config.max_body_bytes(), 50 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_arguments() {
        let config = ServerConfig::parse_from([
            "ppt-translate-server",
            "--bind",
            "0.0.0.0",
            "-p",
            "9000",
            "--max-chars",
            "500",
            "--preserve-run-attributes",
        ]);

        assert_eq!(config.address(), "0.0.0.0:9000");
        let options = config.translation_options();
        assert_eq!(options.max_chars, 500);
        assert!(options.preserve_run_attributes);
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let config = ServerConfig::parse_from(["ppt-translate-server", "--max-chars", "0"]);
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
