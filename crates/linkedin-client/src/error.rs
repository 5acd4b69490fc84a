//! Error types for the LinkedIn client.

use thiserror::Error;
use url::Url;

/// Errors returned by [`crate::LinkedInApi`] implementations.
#[derive(Error, Debug)]
pub enum LinkedInError {
    /// Client could not be constructed (missing token, invalid base URL).
    #[error("{0}")]
    Config(String),

    /// The request never produced a response (connect, timeout, TLS).
    #[error("LinkedIn request failed: {0}")]
    Transport(String),

    /// LinkedIn answered with a non-success status.
    #[error("LinkedIn API error ({status}): {message}")]
    Http { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode LinkedIn response: {0}")]
    Decode(String),

    /// A create call succeeded but neither the header nor the body carried the new id.
    #[error("LinkedIn did not return an id for the created {0}")]
    MissingEntityId(&'static str),

    /// Free-form failure, mostly produced by test doubles.
    #[error("{0}")]
    Other(String),
}

/// Result type alias for LinkedIn client operations.
pub type Result<T> = std::result::Result<T, LinkedInError>;

impl From<reqwest::Error> for LinkedInError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(sanitize_reqwest_error(&value))
        } else {
            Self::Transport(sanitize_reqwest_error(&value))
        }
    }
}

/// Drop credentials, query and fragment so search keywords and tokens never reach logs.
#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

#[must_use]
pub fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(u) = e.url() {
        msg = msg.replace(u.as_str(), &redact_url(u));
    }
    msg
}
