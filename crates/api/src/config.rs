use std::sync::Arc;
use std::time::Duration;

use daybook_suggest::model::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use daybook_suggest::{GeminiConfig, GeminiModel, SuggestionService};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Mark the session cookie `Secure` (default: `true`).
    pub cookie_secure: bool,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Hosted model settings for note suggestions.
    pub suggest: SuggestConfig,
}

/// Settings for the note suggestion model.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// `None` leaves suggestions unconfigured.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:9002`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `COOKIE_SECURE`        | `true`                     |
    ///
    /// See [`JwtConfig::from_env`] and [`SuggestConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:9002".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cookie_secure,
            jwt: JwtConfig::from_env(),
            suggest: SuggestConfig::from_env(),
        }
    }
}

impl SuggestConfig {
    /// | Env Var                | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`       | unset (suggestions disabled)                |
    /// | `GEMINI_MODEL`         | `gemini-2.0-flash`                          |
    /// | `GEMINI_BASE_URL`      | `https://generativelanguage.googleapis.com` |
    /// | `SUGGEST_TIMEOUT_SECS` | `30`                                        |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.into());

        let timeout_secs: u64 = std::env::var("SUGGEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SUGGEST_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        }
    }

    /// Build the suggestion service.
    ///
    /// A missing key is logged as a critical error and yields an unconfigured
    /// service; the server still starts.
    pub fn build_service(&self) -> SuggestionService {
        let Some(api_key) = self.api_key.clone() else {
            tracing::error!(
                severity = "CRITICAL",
                "GEMINI_API_KEY is not set; note suggestions are disabled"
            );
            return SuggestionService::unconfigured();
        };

        let config = GeminiConfig {
            api_key,
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        };

        match GeminiModel::new(config) {
            Ok(model) => {
                tracing::info!(model = %self.model, "Suggestion model configured");
                SuggestionService::new(Arc::new(model))
            }
            Err(e) => {
                tracing::error!(
                    severity = "CRITICAL",
                    error = %e,
                    "Failed to build suggestion model client; note suggestions are disabled"
                );
                SuggestionService::unconfigured()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggest(api_key: Option<&str>) -> SuggestConfig {
        SuggestConfig {
            api_key: api_key.map(str::to_string),
            model: DEFAULT_GEMINI_MODEL.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn missing_key_builds_unconfigured_service() {
        assert!(!suggest(None).build_service().is_configured());
    }

    #[test]
    fn key_builds_configured_service() {
        assert!(suggest(Some("abc")).build_service().is_configured());
    }
}
