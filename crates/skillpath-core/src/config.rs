//! Explicit configuration for the external providers and the curator.
//!
//! Credentials are never read from the environment here; the binary
//! resolves them and hands the result in. An absent key is represented as
//! [`Credential::Unconfigured`] rather than an empty string.

use std::fmt;

/// An API key that may or may not have been supplied.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credential {
    Configured(String),
    #[default]
    Unconfigured,
}

impl Credential {
    /// Wrap an optional key; empty or whitespace-only keys count as absent.
    pub fn from_option(key: Option<String>) -> Self {
        match key {
            Some(k) if !k.trim().is_empty() => Self::Configured(k.trim().to_owned()),
            _ => Self::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    pub fn secret(&self) -> Option<&str> {
        match self {
            Self::Configured(k) => Some(k),
            Self::Unconfigured => None,
        }
    }
}

// Keys must never end up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured(_) => f.write_str("Configured(***)"),
            Self::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// Settings for the Gemini generation provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Credential,
    /// Model name, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// Base URL of the Generative Language API.
    pub endpoint: String,
}

impl GeminiConfig {
    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
    pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

    pub fn new(api_key: Credential) -> Self {
        Self {
            api_key,
            model: Self::DEFAULT_MODEL.to_owned(),
            endpoint: Self::DEFAULT_ENDPOINT.to_owned(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full URL of the `generateContent` call for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Settings for the Serper search provider.
#[derive(Debug, Clone)]
pub struct SerperConfig {
    pub api_key: Credential,
    pub endpoint: String,
}

impl SerperConfig {
    pub const DEFAULT_ENDPOINT: &str = "https://google.serper.dev/search";

    pub fn new(api_key: Credential) -> Self {
        Self {
            api_key,
            endpoint: Self::DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

/// Tuning for the curator.
#[derive(Debug, Clone)]
pub struct CurationConfig {
    /// Upper bound on days whose resources are resolved at the same time.
    /// `1` resolves days strictly one after another.
    pub max_concurrent_days: usize,
}

impl CurationConfig {
    pub const DEFAULT_MAX_CONCURRENT_DAYS: usize = 4;
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_days: Self::DEFAULT_MAX_CONCURRENT_DAYS,
        }
    }
}
