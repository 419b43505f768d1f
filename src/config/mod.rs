//! Configuration module for the pharmacy product admin.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;

/// Default backend address used during local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// How the side-effects and warnings inputs are written into the multipart payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideEffectsEncoding {
    /// Each input is sent under its own key.
    #[default]
    Separate,
    /// Both inputs share the `sideEffects` key; warnings win when both are set.
    Legacy,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API, without trailing slash
    pub api_url: String,
    /// Bearer token of the current session
    pub session_token: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Encoding of the side-effects/warnings inputs
    pub side_effects_encoding: SideEffectsEncoding,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = normalize_base_url(
            &env::var("PHARMACY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        );

        let session_token = env::var("PHARMACY_SESSION_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let log_level = env::var("PHARMACY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("PHARMACY_LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let side_effects_encoding = match env::var("PHARMACY_LEGACY_SIDE_EFFECTS") {
            Ok(value) if is_truthy(&value) => SideEffectsEncoding::Legacy,
            _ => SideEffectsEncoding::Separate,
        };

        Self {
            api_url,
            session_token,
            log_level,
            log_format,
            side_effects_encoding,
        }
    }

    /// Configuration pointing at `api_url` with every other setting defaulted.
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: normalize_base_url(api_url),
            session_token: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            side_effects_encoding: SideEffectsEncoding::Separate,
        }
    }

    /// Collection endpoint of the products resource.
    pub fn products_url(&self) -> String {
        format!("{}/products", self.api_url)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
