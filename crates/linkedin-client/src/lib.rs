//! LinkedIn REST client.
//!
//! The MCP server only depends on the [`LinkedInApi`] capability; [`LinkedInClient`] is the
//! production implementation that talks to LinkedIn's Rest.li v2 endpoints.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::LinkedInApi;
pub use client::{DEFAULT_BASE_URL, LinkedInClient};
pub use error::{LinkedInError, Result};
pub use types::*;
