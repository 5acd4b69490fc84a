//! Uniform result envelopes.

use crate::error::ToolError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// What a successful handler produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Pretty-printed JSON of the value LinkedIn returned.
    Json(String),
    /// Human-readable confirmation for mutations.
    Confirmation(String),
}

impl Outcome {
    /// Render a domain value as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Render`] if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ToolError> {
        Ok(Self::Json(serde_json::to_string_pretty(value)?))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Json(s) | Self::Confirmation(s) => s,
        }
    }

    #[must_use]
    pub fn into_result(self) -> CallToolResult {
        let text = match self {
            Self::Json(s) | Self::Confirmation(s) => s,
        };
        CallToolResult::success(vec![Content::text(text)])
    }
}

/// Error envelope: `Error: <message>` with `is_error` set.
#[must_use]
pub fn error_result(err: &ToolError) -> CallToolResult {
    let message = err.to_string();
    let message = if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    };
    CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
}

/// Wrap a handler outcome. Failures never escape; they become error envelopes.
#[must_use]
pub fn to_call_result(outcome: Result<Outcome, ToolError>) -> CallToolResult {
    match outcome {
        Ok(outcome) => outcome.into_result(),
        Err(err) => error_result(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedin_mcp_client::LinkedInError;
    use serde_json::{Value, json};

    fn text_of(result: &CallToolResult) -> String {
        let v = serde_json::to_value(result).expect("CallToolResult serializes");
        v.get("content")
            .and_then(Value::as_array)
            .and_then(|c| c.first())
            .and_then(|c| c.get("text"))
            .and_then(Value::as_str)
            .expect("content[0].text")
            .to_string()
    }

    #[test]
    fn success_wraps_text_without_error_flag() {
        let result = to_call_result(Ok(Outcome::Confirmation(
            "Successfully deleted skill: s-1".to_string(),
        )));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
        assert_eq!(text_of(&result), "Successfully deleted skill: s-1");
    }

    #[test]
    fn json_outcome_is_indented_and_parses_back() {
        let value = json!([{ "id": "post-1", "text": "Test post" }]);
        let outcome = Outcome::json(&value).expect("render");
        assert!(outcome.text().contains("\n  "), "expected indentation");
        let parsed: Value = serde_json::from_str(outcome.text()).expect("parse");
        assert_eq!(parsed, value);
    }

    #[test]
    fn errors_are_prefixed_and_flagged() {
        let result = to_call_result(Err(ToolError::UnknownTool("nope".to_string())));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Unknown tool: nope");
    }

    #[test]
    fn remote_errors_keep_their_message() {
        let err = ToolError::Remote(LinkedInError::Other("API Error".to_string()));
        assert_eq!(text_of(&error_result(&err)), "Error: API Error");
    }

    #[test]
    fn empty_messages_render_unknown_error() {
        let err = ToolError::Remote(LinkedInError::Other(String::new()));
        let result = error_result(&err);
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Unknown error");
    }
}
