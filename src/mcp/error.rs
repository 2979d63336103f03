use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::client::VaultError;

/// Failure of a single tool or prompt call.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid arguments: {0}")]
    InvalidArgument(String),

    #[error("invalid {name}: '{value}' (must be one of {allowed})")]
    InvalidEnumValue {
        name: &'static str,
        value: String,
        allowed: &'static str,
    },

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("request canceled")]
    Canceled,

    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl DispatchError {
    /// True for errors raised locally, before any backend call.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            DispatchError::InvalidArgument(_)
                | DispatchError::InvalidEnumValue { .. }
                | DispatchError::UnknownTool(_)
                | DispatchError::UnknownPrompt(_)
        )
    }
}

impl From<DispatchError> for McpError {
    fn from(e: DispatchError) -> Self {
        if e.is_caller_error() {
            McpError::invalid_params(e.to_string(), None)
        } else {
            McpError::internal_error(e.to_string(), None)
        }
    }
}
