use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use super::args::Arguments;
use super::catalog::{self, PromptDescriptor, PromptKind, ToolDescriptor, ToolKind};
use super::error::DispatchError;
use super::prompts::{self, PromptOutput};
use super::tools::{self, ToolOutput};
use crate::client::VaultApi;

/// Routes named tool and prompt calls to their handlers.
///
/// Stateless apart from the shared vault handle, so clones are cheap and
/// calls may run concurrently.
pub struct Dispatcher<V: ?Sized> {
    vault: Arc<V>,
}

impl<V: ?Sized> Clone for Dispatcher<V> {
    fn clone(&self) -> Self {
        Self {
            vault: Arc::clone(&self.vault),
        }
    }
}

impl<V: VaultApi + ?Sized> Dispatcher<V> {
    pub fn new(vault: Arc<V>) -> Self {
        Self { vault }
    }

    pub fn tools(&self) -> &'static [ToolDescriptor] {
        catalog::TOOLS
    }

    pub fn prompts(&self) -> &'static [PromptDescriptor] {
        catalog::PROMPTS
    }

    pub async fn call_tool(
        &self,
        name: &str,
        args: Option<Arguments>,
    ) -> Result<ToolOutput, DispatchError> {
        let tool =
            catalog::find_tool(name).ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;
        debug!(tool = name, "tool call");

        let output = match tool.kind {
            ToolKind::GetNote => tools::get_note(&*self.vault, args).await?,
            ToolKind::UpdateNote => tools::update_note(&*self.vault, args).await?,
        };

        if output.is_error {
            warn!(tool = name, error = %output.text, "tool reported a backend error");
        }
        Ok(output)
    }

    pub async fn get_prompt(
        &self,
        name: &str,
        args: Option<Arguments>,
    ) -> Result<PromptOutput, DispatchError> {
        let prompt = catalog::find_prompt(name)
            .ok_or_else(|| DispatchError::UnknownPrompt(name.to_string()))?;
        debug!(prompt = name, "prompt request");

        let result = match prompt.kind {
            PromptKind::NoteSummarizer => prompts::note_summarizer(&*self.vault, args).await,
            PromptKind::NoteAnalyzer => prompts::note_analyzer(&*self.vault, args).await,
            PromptKind::VaultOverview => Ok(prompts::vault_overview()),
        };

        if let Err(e) = &result {
            warn!(prompt = name, error = %e, "prompt failed");
        }
        result
    }
}

/// Run `work` unless `cancelled` resolves first.
///
/// On cancellation `work` is dropped, which aborts any HTTP request it had
/// in flight.
pub async fn cancellable<T, W, C>(work: W, cancelled: C) -> Result<T, DispatchError>
where
    W: Future<Output = Result<T, DispatchError>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancelled => {
            debug!("call canceled by transport");
            Err(DispatchError::Canceled)
        }
        result = work => result,
    }
}
