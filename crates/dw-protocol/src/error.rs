//! Error classification for the transport boundary.
//!
//! The engine's error taxonomy collapses onto three wire classes: malformed
//! payloads, unknown sessions, and engine-rejected operations. The message
//! string travels verbatim; it is written for the agent to read.

use serde::{Deserialize, Serialize};

use dw_engine::EngineError;

/// Wire classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request payload (or level document) was malformed.
    BadRequest,
    /// No session with the given ID.
    NotFound,
    /// The engine rejected the operation.
    UnprocessableEntity,
}

impl ErrorKind {
    /// The HTTP status this class maps to in the JSON-over-HTTP binding.
    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::UnprocessableEntity => 422,
        }
    }
}

/// A failure as it crosses the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub error: String,
}

impl ErrorBody {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BadRequest,
            error: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            error: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnprocessableEntity,
            error: message.into(),
        }
    }
}

impl From<&EngineError> for ErrorBody {
    fn from(err: &EngineError) -> Self {
        Self::unprocessable(err.to_string())
    }
}
