use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy shared by every backend
#[derive(Error, Debug)]
pub enum LlmError {
    /// Authentication failed. `status` is set only when the backend rejected
    /// the credential (HTTP 401); local checks leave it empty.
    #[error("{message}")]
    Authentication {
        message: String,
        status: Option<u16>,
    },

    /// Rate limit exceeded (HTTP 429)
    #[error("{message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    /// Invalid request parameters (HTTP 400)
    #[error("{message}")]
    InvalidRequest { message: String },

    /// Backend-side failure (HTTP 5xx)
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Any other non-success status, qualified with the backend name
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Network or connection error
    #[error("{message}")]
    Network { message: String },

    /// The backend id is a placeholder or is not registered at all
    #[error("{message}")]
    UnsupportedBackend { message: String },

    /// JSON parsing or serialization error
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error for unexpected cases
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Stable, serializable classification of an [`LlmError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    RateLimit,
    BadRequest,
    Server,
    Api,
    Network,
    UnsupportedBackend,
    Parse,
    Internal,
}

impl LlmError {
    /// Create an authentication error for a credential rejected before sending
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
            status: None,
        }
    }

    /// Create an authentication error for a credential the backend rejected
    pub fn unauthorized<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Authentication {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a rate limit error
    pub fn rate_limit<S: Into<String>>(message: S, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Create an invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create an API error
    pub fn api_error<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an unsupported backend error
    pub fn unsupported_backend<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedBackend {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Auth,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::InvalidRequest { .. } => ErrorKind::BadRequest,
            Self::Server { .. } => ErrorKind::Server,
            Self::Api { .. } => ErrorKind::Api,
            Self::Network { .. } => ErrorKind::Network,
            Self::UnsupportedBackend { .. } => ErrorKind::UnsupportedBackend,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// HTTP status preserved from the backend response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::InvalidRequest { .. } => Some(400),
            Self::RateLimit { .. } => Some(429),
            Self::Server { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Network { .. }
            | Self::UnsupportedBackend { .. }
            | Self::Parse { .. }
            | Self::Internal { .. } => None,
        }
    }

    /// Prefix the message with backend context, keeping kind and status intact.
    ///
    /// Unsupported-backend errors already carry a complete message and pass
    /// through untouched.
    pub fn with_context(self, prefix: &str) -> Self {
        let qualify = |message: String| format!("{prefix}{message}");
        match self {
            Self::Authentication { message, status } => Self::Authentication {
                message: qualify(message),
                status,
            },
            Self::RateLimit {
                message,
                retry_after,
            } => Self::RateLimit {
                message: qualify(message),
                retry_after,
            },
            Self::InvalidRequest { message } => Self::InvalidRequest {
                message: qualify(message),
            },
            Self::Server { status, message } => Self::Server {
                status,
                message: qualify(message),
            },
            Self::Api { status, message } => Self::Api {
                status,
                message: qualify(message),
            },
            Self::Network { message } => Self::Network {
                message: qualify(message),
            },
            Self::Internal { message } => Self::Internal {
                message: qualify(message),
            },
            other @ (Self::UnsupportedBackend { .. } | Self::Parse { .. }) => other,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}
