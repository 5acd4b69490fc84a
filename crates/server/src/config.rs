//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};
use linkedin_mcp_client::DEFAULT_BASE_URL;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportKind {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// MCP streamable HTTP at `/mcp`.
    StreamableHttp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "linkedin-mcp-server",
    version,
    about = "MCP server exposing LinkedIn as tools"
)]
pub struct Cli {
    /// OAuth bearer token for the LinkedIn API.
    #[arg(long, env = "LINKEDIN_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, env = "LINKEDIN_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Per-request timeout in seconds; 0 disables it.
    #[arg(long, env = "LINKEDIN_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = TransportKind::Stdio)]
    pub transport: TransportKind,

    /// Bind host for the streamable HTTP transport.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Bind port for the streamable HTTP transport.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Load a `.env` file from the working directory or one of its parents. Variables already set in
/// the process environment win. Returns the file that was read, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub access_token: Option<String>,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub transport: TransportKind,
    pub host: String,
    pub port: u16,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            transport: TransportKind::default(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            access_token: cli.access_token,
            api_base_url: cli.api_base_url,
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            transport: cli.transport,
            host: cli.host,
            port: cli.port,
            log_level: cli.log_level,
            log_format: cli.log_format,
        }
    }
}

impl ServerConfig {
    /// Check every setting and report all problems at once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing each problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self
            .access_token
            .as_deref()
            .is_none_or(|t| t.trim().is_empty())
        {
            problems.push("LINKEDIN_ACCESS_TOKEN is required".to_string());
        }

        match url::Url::parse(&self.api_base_url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            Ok(u) => problems.push(format!(
                "LINKEDIN_API_BASE_URL must use http or https, got '{}'",
                u.scheme()
            )),
            Err(e) => problems.push(format!("LINKEDIN_API_BASE_URL is not a valid URL: {e}")),
        }

        if self.transport == TransportKind::StreamableHttp && self.host.parse::<IpAddr>().is_err()
        {
            problems.push(format!("HOST must be an IP address, got '{}'", self.host));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Bind address for the streamable HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::Invalid(vec![format!(
                "HOST must be an IP address, got '{}'",
                self.host
            )])
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
