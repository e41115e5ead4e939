use serde::{Deserialize, Serialize};

/// Error body returned by the catalog backend on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ApiErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: Some(msg.into()),
        }
    }

    /// Parses a response body, tolerating empty or non-JSON payloads.
    pub fn parse(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }
}
