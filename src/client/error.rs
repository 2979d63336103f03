use thiserror::Error;

/// Failures surfaced by the vault client.
///
/// The client never recovers from any of these itself; every failure reaches
/// the caller as one of the variants below.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("backend request failed with status {status}: {body}")]
    BackendRequestFailed { status: u16, body: String },

    #[error("malformed response from vault backend: {0}")]
    MalformedResponse(String),

    #[error("request failed: timed out waiting for the vault backend")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("invalid note path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("{operation} is not supported by the {layout} layout")]
    Unsupported {
        operation: &'static str,
        layout: &'static str,
    },
}

impl VaultError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VaultError::NotFound { .. })
    }

    /// HTTP status carried by a backend failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            VaultError::BackendRequestFailed { status, .. } => Some(*status),
            VaultError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VaultError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            VaultError::Timeout
        } else if e.is_decode() {
            VaultError::MalformedResponse(e.to_string())
        } else {
            VaultError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        VaultError::MalformedResponse(e.to_string())
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
