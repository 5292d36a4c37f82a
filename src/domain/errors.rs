//! Client error types
//!
//! These errors are UI-agnostic: the controller decides how each one is shown.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::FormField;

/// First validation rule a draft failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: FormField,
    pub message: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Structured error body returned by the backend on non-2xx responses.
///
/// Either shape may be present: `{ "message": ... }` or
/// `{ "errors": { field: message } }`. Both parse into this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_field_errors")]
    pub errors: BTreeMap<String, String>,
}

impl ErrorBody {
    /// Parse a raw response body, returning `None` when it is not a JSON object
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

// Only an object maps to fields; arrays and scalars (Spring-style
// `"errors": [...]`) leave the map empty so `message` still applies.
// Non-string messages keep their JSON text.
fn deserialize_field_errors<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let serde_json::Value::Object(raw) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(raw
        .into_iter()
        .map(|(field, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (field, text)
        })
        .collect())
}

#[derive(Debug)]
pub enum ClientError {
    /// Draft rejected before any request was made
    Validation(ValidationError),
    /// Backend answered with a non-success status
    Http {
        status: u16,
        reason: String,
        body: Option<ErrorBody>,
    },
    /// Request never completed
    Transport(String),
    /// Success response with a body that is not the expected JSON
    Decode(String),
}

impl ClientError {
    /// Synthesized `HTTP {code}: {reason}` line for bodies without a message
    pub fn status_line(status: u16, reason: &str) -> String {
        format!("HTTP {}: {}", status, reason)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(e) => write!(f, "Validation error: {}", e),
            ClientError::Http {
                status,
                reason,
                body,
            } => match body.as_ref().and_then(|b| b.message.as_deref()) {
                Some(msg) => write!(f, "{} ({})", Self::status_line(*status, reason), msg),
                None => f.write_str(&Self::status_line(*status, reason)),
            },
            ClientError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ClientError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ValidationError> for ClientError {
    fn from(e: ValidationError) -> Self {
        ClientError::Validation(e)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
