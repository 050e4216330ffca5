use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

pub const GOOGLE_SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Process configuration, read once at startup.
///
/// Keys map one-to-one onto the deployment's environment variables
/// (`PORT`, `RGS_ENDPOINT`, `PUBLIC_KEY`, ...).
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub port: u16,
    /// Spreadsheet web app URL.
    pub rgs_endpoint: String,
    /// Shared secret appended to lookups sent to the spreadsheet.
    #[serde(default)]
    pub rgs_secret: String,
    /// Key the frontend must present. Shipped in client code, so not a secret.
    pub public_key: String,
    #[serde(default)]
    pub recaptcha_secret: String,
    pub recaptcha_verify_url: String,
    /// Comma separated origin allow-list, `*` allows every origin.
    pub allowed_origins: String,
    pub upstream_timeout_secs: u64,
    pub notify_require_key: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::defaults()?
            // Optional settings files, e.g. for local development
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }

    /// Builds the configuration from an explicit variable map instead of the
    /// process environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(Environment::default().source(Some(vars)))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("port", 3000_i64)?
            .set_default("recaptcha_verify_url", GOOGLE_SITEVERIFY_URL)?
            .set_default("allowed_origins", "*")?
            .set_default("upstream_timeout_secs", 10_i64)?
            .set_default("notify_require_key", true)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_fill_optional_settings() {
        let config = Config::from_env_map(vars(&[
            ("RGS_ENDPOINT", "https://sheets.example/exec"),
            ("PUBLIC_KEY", "FRONTEND_KEY"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.rgs_endpoint, "https://sheets.example/exec");
        assert_eq!(config.public_key, "FRONTEND_KEY");
        assert_eq!(config.rgs_secret, "");
        assert_eq!(config.recaptcha_verify_url, GOOGLE_SITEVERIFY_URL);
        assert_eq!(config.allowed_origins, "*");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert!(config.notify_require_key);
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_env_map(vars(&[
            ("PORT", "8080"),
            ("RGS_ENDPOINT", "https://sheets.example/exec"),
            ("RGS_SECRET", "sheet-secret"),
            ("PUBLIC_KEY", "FRONTEND_KEY"),
            ("RECAPTCHA_SECRET", "captcha-secret"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
            ("NOTIFY_REQUIRE_KEY", "false"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.rgs_secret, "sheet-secret");
        assert_eq!(config.recaptcha_secret, "captcha-secret");
        assert_eq!(config.allowed_origins, "https://a.example, https://b.example");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(3));
        assert!(!config.notify_require_key);
    }

    #[test]
    fn test_missing_public_key_is_an_error() {
        let result = Config::from_env_map(vars(&[("RGS_ENDPOINT", "https://sheets.example/exec")]));
        assert!(result.is_err());
    }
}
