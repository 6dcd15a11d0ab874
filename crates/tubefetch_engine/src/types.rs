use std::fmt;

use serde::Deserialize;

/// Form fields posted to the download endpoint, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadRequest {
    pub fields: Vec<(String, String)>,
}

/// `{ "success": bool, "message": string }` returned once the job is over.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One poll tick produced a well-formed log list.
    LogsFetched { tick: u64, lines: Vec<String> },
    DownloadCompleted(Result<DownloadResponse, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Cancelled,
    Network,
    /// The engine's async runtime could not be started.
    Runtime,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Runtime => write!(f, "runtime unavailable"),
        }
    }
}
