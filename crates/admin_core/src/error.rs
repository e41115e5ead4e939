use thiserror::Error;

use crate::form::ValidationErrors;

/// Failure of a single request against the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message the server attached to a non-2xx response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field '{field}' expects a {expected} value")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

/// Why a product submission did not reach the navigation step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("server answered create with unexpected status {0}")]
    UnexpectedStatus(u16),
}
