//! Error types for the LinkedIn MCP server.

use linkedin_mcp_client::LinkedInError;
use thiserror::Error;

/// Failure of a single tool call. Always converted into an error envelope, never returned to the
/// transport.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The requested name is not part of the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// One or more required arguments are absent, `null`, or empty strings.
    #[error("{0}")]
    MissingArgument(String),

    /// An argument is present but has the wrong type or an out-of-range value.
    #[error("{0}")]
    InvalidArgument(String),

    /// LinkedIn rejected the call.
    #[error("{0}")]
    Remote(#[from] LinkedInError),

    /// The client's answer could not be rendered as JSON text.
    #[error("failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

/// Failures that prevent the server from being built or served.
#[derive(Error, Debug)]
pub enum ServerError {
    /// No access token was configured.
    #[error("LinkedIn access token is required")]
    MissingCredential,

    /// The LinkedIn client could not be constructed.
    #[error("Startup error: {0}")]
    Client(#[source] LinkedInError),

    /// The MCP transport could not be bound or failed while serving.
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for server lifecycle operations.
pub type Result<T> = std::result::Result<T, ServerError>;
