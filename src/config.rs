//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Parsing goes through
//! [`GatewayConfig::from_lookup`] so it can be exercised without touching
//! the process environment.

use std::net::SocketAddr;

/// Routes owned by the gateway itself; `PROMPT_PATH` may not shadow them.
pub const RESERVED_PATHS: &[&str] = &["/ws", "/health", "/info", "/docs", "/api-docs/openapi.json"];

/// Prefix owned by the Swagger UI routes.
const DOCS_PREFIX: &str = "/docs";

/// Example prompt used when `PROMPT_EXAMPLES` is unset or empty.
pub const DEFAULT_EXAMPLE: &str = "What is the capital of the Netherlands?";

/// Errors raised while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        /// Raw value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// `PROMPT_PATH` is not a plain route or overlaps a reserved one.
    #[error("invalid PROMPT_PATH {0:?}: expected a literal route outside the reserved paths")]
    InvalidPromptPath(String),

    /// `LLM_BACKEND` names an unknown backend.
    #[error("unknown LLM_BACKEND {0:?}: expected \"echo\" or \"remote\"")]
    UnknownBackend(String),

    /// The remote backend was selected without `LLM_REMOTE_URL`.
    #[error("LLM_REMOTE_URL is required when LLM_BACKEND=remote")]
    MissingRemoteUrl,

    /// `LOG_FORMAT` names an unknown format.
    #[error("unknown LOG_FORMAT {0:?}: expected \"pretty\" or \"json\"")]
    UnknownLogFormat(String),
}

/// Which [`crate::service::PromptService`] backend to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Answer every prompt with itself.
    Echo,
    /// Forward prompts to an upstream model server.
    Remote {
        /// Upstream prompt endpoint.
        url: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Descriptive metadata shown by `/info` and the OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    /// API title.
    pub title: String,
    /// API description.
    pub description: String,
    /// API version.
    pub version: String,
    /// Example prompts. Never empty; the first one is the GET default.
    pub examples: Vec<String>,
}

impl ApiInfo {
    /// Prompt used by `GET` requests that omit `prompt`.
    #[must_use]
    pub fn default_prompt(&self) -> &str {
        self.examples.first().map_or(DEFAULT_EXAMPLE, String::as_str)
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// Route serving `GET`/`POST` prompts.
    pub prompt_path: String,

    /// Descriptive metadata.
    pub info: ApiInfo,

    /// Model backend.
    pub backend: BackendConfig,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            prompt_path: "/prompt".to_string(),
            info: ApiInfo {
                title: "Libre Chat".to_string(),
                description: "Query a language model over HTTP or WebSocket.".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                examples: vec![DEFAULT_EXAMPLE.to_string()],
            },
            backend: BackendConfig::Echo,
            log_format: LogFormat::Pretty,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file, then
    /// defers to [`GatewayConfig::from_lookup`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to [`GatewayConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("LISTEN_ADDR") {
            config.listen_addr = value
                .parse()
                .map_err(|source| ConfigError::InvalidListenAddr { value, source })?;
        }

        if let Some(path) = lookup("PROMPT_PATH") {
            if !is_valid_prompt_path(&path) {
                return Err(ConfigError::InvalidPromptPath(path));
            }
            config.prompt_path = path;
        }

        if let Some(title) = lookup("API_TITLE") {
            config.info.title = title;
        }
        if let Some(description) = lookup("API_DESCRIPTION") {
            config.info.description = description;
        }
        if let Some(version) = lookup("API_VERSION") {
            config.info.version = version;
        }
        if let Some(raw) = lookup("PROMPT_EXAMPLES") {
            let examples = parse_examples(&raw);
            if !examples.is_empty() {
                config.info.examples = examples;
            }
        }

        config.backend = match lookup("LLM_BACKEND").as_deref() {
            None | Some("echo") => BackendConfig::Echo,
            Some("remote") => BackendConfig::Remote {
                url: lookup("LLM_REMOTE_URL").ok_or(ConfigError::MissingRemoteUrl)?,
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        config.log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::UnknownLogFormat(other.to_string())),
        };

        Ok(config)
    }
}

/// A prompt path must be a literal route the router accepts: it starts with
/// `/`, has no capture or wildcard syntax, and stays clear of the reserved
/// routes and everything under `/docs`.
fn is_valid_prompt_path(path: &str) -> bool {
    let literal = path.starts_with('/')
        && !path.contains(['{', '}', '*'])
        && !path.split('/').any(|segment| segment.starts_with(':'));
    let under_docs = path
        .strip_prefix(DOCS_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
    literal && !under_docs && !RESERVED_PATHS.contains(&path)
}

/// Splits a `|`-separated list, dropping blank entries.
fn parse_examples(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
