//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid or the
//! application exits with a clear error message before binding a socket.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Server bind address.
    pub host: String,

    /// Server listen port.
    pub port: u16,

    /// Identity Provider REST API base URL.
    pub identity_api_url: String,

    /// Identity Provider secret API key.
    pub identity_secret_key: String,

    /// Shared secret for webhook signature verification (`whsec_...`).
    pub webhook_secret: String,

    /// Transactional-mail API base URL.
    pub mail_api_url: String,

    /// Transactional-mail API key.
    pub mail_api_key: String,

    /// Sending address the mail API key is authorized for.
    pub mail_from: String,

    /// Sign-in URL included in welcome mails.
    pub login_url: String,

    /// Timeout applied to every outbound HTTP call.
    pub request_timeout: Duration,

    /// Tracing filter directive (e.g., "info,aulario=debug").
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("identity_api_url", &self.identity_api_url)
            .field("identity_secret_key", &"[redacted]")
            .field("webhook_secret", &"[redacted]")
            .field("mail_api_url", &self.mail_api_url)
            .field("mail_api_key", &"[redacted]")
            .field("mail_from", &self.mail_from)
            .field("login_url", &self.login_url)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required Variables
    ///
    /// - `IDENTITY_SECRET_KEY` - Identity Provider API key
    /// - `IDENTITY_WEBHOOK_SECRET` - webhook signing secret (`whsec_...`)
    /// - `MAIL_API_KEY` - transactional-mail API key
    ///
    /// # Optional Variables
    ///
    /// - `HOST` - bind address (default: "0.0.0.0")
    /// - `PORT` - listen port (default: 8080)
    /// - `IDENTITY_API_URL` - provider API base (default: Clerk's)
    /// - `MAIL_API_URL` - mail API base (default: Resend's)
    /// - `MAIL_FROM` - sending address
    /// - `LOGIN_URL` - sign-in link for welcome mails
    /// - `REQUEST_TIMEOUT_SECS` - outbound call timeout (default: 10)
    /// - `RUST_LOG` - log filter (default: "info")
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        let identity_api_url = env::var("IDENTITY_API_URL")
            .unwrap_or_else(|_| "https://api.clerk.com/v1".to_string());
        let identity_secret_key = env::var("IDENTITY_SECRET_KEY")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_SECRET_KEY".to_string()))?;

        let webhook_secret = env::var("IDENTITY_WEBHOOK_SECRET")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_WEBHOOK_SECRET".to_string()))?;
        if !webhook_secret.starts_with("whsec_") {
            return Err(ConfigError::InvalidValue {
                var: "IDENTITY_WEBHOOK_SECRET".to_string(),
                message: "Must be a whsec_-prefixed signing secret".to_string(),
            });
        }

        let mail_api_url =
            env::var("MAIL_API_URL").unwrap_or_else(|_| "https://api.resend.com".to_string());
        let mail_api_key = env::var("MAIL_API_KEY")
            .map_err(|_| ConfigError::MissingVar("MAIL_API_KEY".to_string()))?;
        let mail_from = env::var("MAIL_FROM")
            .unwrap_or_else(|_| "Aulario <noreply@aulario.example.com>".to_string());

        let login_url = env::var("LOGIN_URL")
            .unwrap_or_else(|_| "http://localhost:3000/sign-in".to_string());

        let timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
            .max(1);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            host,
            port,
            identity_api_url,
            identity_secret_key,
            webhook_secret,
            mail_api_url,
            mail_api_key,
            mail_from,
            login_url,
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log,
        })
    }

    /// Get the server bind address as a socket address string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
