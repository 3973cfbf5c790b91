//! JSON bodies exchanged with the container service.

use bbq_common::types::Handle;
use serde::Deserialize;

/// Body returned by `POST /containers`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    pub handle: Handle,
}

/// Body returned by `GET /containers`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub handles: Vec<Handle>,
}

/// Error body returned with a non-success status.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl ErrorResponse {
    /// Decodes an error body, falling back to the raw text.
    pub(crate) fn parse(body: &str) -> Self {
        match serde_json::from_str::<Self>(body) {
            Ok(err) if !err.message.is_empty() => err,
            Ok(err) => Self {
                kind: err.kind,
                message: body.trim().to_string(),
            },
            Err(_) => Self {
                kind: None,
                message: body.trim().to_string(),
            },
        }
    }
}
