use thiserror::Error;

/// Client-side API error.
///
/// Every operation against the dashboard service resolves to either its
/// decoded payload or exactly one of these variants. Callers that only need
/// a coarse classification (e.g. to pick a retry affordance) should use
/// [`ApiError::kind`] instead of matching variants directly.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401/403 — the ambient session is missing, expired, or rejected.
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport failure: connect, DNS, or timeout.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not decode into the expected record shape.
    #[error("decode: {0}")]
    Decode(String),

    /// The owning controller was torn down while the request was in flight.
    #[error("cancelled")]
    Cancelled,
}

impl ApiError {
    /// Map a non-2xx status to the right variant.
    ///
    /// 401 and 403 are the session-credential failures; everything else is
    /// reported with its status and body.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized { status },
            _ => ApiError::Status { status, message },
        }
    }

    /// Coarse classification, suitable for slice-level failure state.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ApiError::Status { .. } => ErrorKind::Server,
            ApiError::Network(_) => ErrorKind::Transport,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Coarse error classification.
///
/// `Copy` so it can be stored in load-status state without carrying the
/// source error (which is not `Clone` — `reqwest::Error` isn't).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential-class failure (401/403).
    Unauthorized,
    /// Any other non-2xx server response.
    Server,
    /// Network-level failure, including timeouts.
    Transport,
    /// Body failed boundary validation.
    Decode,
    /// Aborted by controller teardown.
    Cancelled,
}
