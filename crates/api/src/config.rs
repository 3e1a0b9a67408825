use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which deployment variant the server runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// `POST /run` returns a job id; results are polled from `/results/{id}`.
    /// Requires a bearer token.
    Async,
    /// `POST /run` blocks and returns the output directly. No auth.
    Sync,
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "async" => Ok(Self::Async),
            "sync" => Ok(Self::Sync),
            _ => Err(ConfigError::Invalid {
                name: "RUN_MODE",
                expected: "`async` or `sync`",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Async => f.write_str("async"),
            Self::Sync => f.write_str("sync"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("API_TOKEN environment variable not set (required when RUN_MODE=async)")]
    MissingApiToken,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Deployment variant (default: async).
    pub mode: RunMode,
    /// Shared bearer secret. Always `Some` in async mode.
    pub api_token: Option<String>,
    /// Root directory of the job store (default: `hurl_results`).
    pub results_dir: PathBuf,
    /// The hurl binary to invoke (default: `hurl`, looked up on `PATH`).
    pub hurl_bin: String,
    /// Optional HTTP request timeout in seconds. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default        |
    /// |------------------------|----------------|
    /// | `HOST`                 | `0.0.0.0`      |
    /// | `PORT`                 | `8080`         |
    /// | `RUN_MODE`             | `async`        |
    /// | `API_TOKEN`            | required (async) |
    /// | `RESULTS_DIR`          | `hurl_results` |
    /// | `HURL_BIN`             | `hurl`         |
    /// | `REQUEST_TIMEOUT_SECS` | unset          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid port number",
                value: raw,
            })?,
            None => 8080,
        };

        let mode = match var("RUN_MODE") {
            Some(raw) => raw.parse::<RunMode>()?,
            None => RunMode::Async,
        };

        let api_token = var("API_TOKEN");
        if mode == RunMode::Async && api_token.is_none() {
            return Err(ConfigError::MissingApiToken);
        }

        let results_dir = var("RESULTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("hurl_results"));

        let hurl_bin = var("HURL_BIN").unwrap_or_else(|| "hurl".into());

        let request_timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                expected: "a whole number of seconds",
                value: raw,
            })?),
            None => None,
        };

        Ok(Self {
            host,
            port,
            mode,
            api_token,
            results_dir,
            hurl_bin,
            request_timeout_secs,
        })
    }
}
