//! MCP server exposing LinkedIn profile, posting and search operations as tools.
//!
//! The crate is split along the path a call takes:
//! - [`catalog`] names the tools and describes their inputs
//! - [`args`] validates raw JSON arguments into typed requests
//! - [`router`] makes exactly one [`linkedin_mcp_client::LinkedInApi`] call per request
//! - [`result`] wraps every outcome in a text envelope
//! - [`gateway`] ties these together behind rmcp's `ServerHandler`
//! - [`lifecycle`] starts and stops the transports

pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod lifecycle;
pub mod result;
pub mod router;
pub mod telemetry;

pub use config::{Cli, ConfigError, LogFormat, LogLevel, ServerConfig, TransportKind};
pub use error::{Result, ServerError, ToolError};
pub use gateway::ToolGateway;
pub use lifecycle::{LinkedInMcpServer, RunningServer};
