use std::collections::HashMap;

use thiserror::Error;

/// Snapshot of a transport-level response: status line, headers, raw body.
///
/// Every outcome that had a response behind it — success structs as well as
/// the [`SzamlazzError::Http`] / [`SzamlazzError::Service`] /
/// [`SzamlazzError::Parse`] variants — carries one of these, so callers
/// always have the raw artifacts for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct AgentResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text (e.g. "Internal Server Error").
    pub status_text: String,
    /// Response headers with lower-cased names.
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Errors that can occur while building entities, serializing them, or
/// talking to the agent endpoint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SzamlazzError {
    /// An entity field failed a construction or serialization-time check.
    #[error("validation failed: {0}")]
    Validation(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Network or connection failure; no response is available.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-200 status.
    #[error("HTTP {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        response: AgentResponse,
    },

    /// The service rejected the request via its error headers despite a
    /// 200 status. `message` is already URL-decoded.
    #[error("service error {code}: {message}")]
    Service {
        code: String,
        message: String,
        response: AgentResponse,
    },

    /// A response that should have been well-formed was not — malformed
    /// XML, undecodable base64, or a missing success header.
    #[error("parse error: {message}")]
    Parse {
        message: String,
        response: Option<AgentResponse>,
    },
}

impl SzamlazzError {
    /// Shorthand for a [`SzamlazzError::Parse`] without response context.
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            response: None,
        }
    }
}
