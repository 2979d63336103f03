//! Tool handlers.
//!
//! Argument errors fail the call. Backend errors do not: they come back as a
//! result flagged `is_error` whose text carries the backend's message.

use serde::Serialize;

use super::args::{self, Arguments};
use super::catalog::{GetNoteParams, UpdateNoteParams};
use super::error::DispatchError;
use crate::client::{VaultApi, VaultError};

pub const UPDATE_CONFIRMATION: &str = "Note updated successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl From<VaultError> for ToolOutput {
    fn from(e: VaultError) -> Self {
        ToolOutput::error(e.to_string())
    }
}

pub async fn get_note<V>(vault: &V, args: Option<Arguments>) -> Result<ToolOutput, DispatchError>
where
    V: VaultApi + ?Sized,
{
    let params: GetNoteParams = args::parse(args)?;
    args::note_path(&params.path)?;
    Ok(match vault.get_file(&params.path).await {
        Ok(file) => ToolOutput::success(file.content),
        Err(e) => e.into(),
    })
}

pub async fn update_note<V>(vault: &V, args: Option<Arguments>) -> Result<ToolOutput, DispatchError>
where
    V: VaultApi + ?Sized,
{
    let params: UpdateNoteParams = args::parse(args)?;
    args::note_path(&params.path)?;
    Ok(match vault.update_file(&params.path, &params.content).await {
        Ok(()) => ToolOutput::success(UPDATE_CONFIRMATION),
        Err(e) => e.into(),
    })
}
