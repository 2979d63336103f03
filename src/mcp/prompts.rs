//! Prompt handlers.
//!
//! Note prompts fetch the note first and embed its full content. Every
//! failure, local or backend, fails the call.

use std::str::FromStr;

use serde::Serialize;

use super::args::{self, Arguments};
use super::catalog::{NoteAnalyzerParams, NotePromptParams};
use super::error::DispatchError;
use crate::client::VaultApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub text: String,
}

impl PromptMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptOutput {
    pub description: String,
    pub messages: Vec<PromptMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Structure,
    Content,
    Links,
    Tags,
}

pub const ANALYSIS_TYPES: &str = "structure, content, links, tags";

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Structure => "structure",
            AnalysisType::Content => "content",
            AnalysisType::Links => "links",
            AnalysisType::Tags => "tags",
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            AnalysisType::Structure => "the structure of",
            AnalysisType::Content => "the content of",
            AnalysisType::Links => "the links and references in",
            AnalysisType::Tags => "the tags and metadata in",
        }
    }

    fn focus(&self) -> &'static str {
        match self {
            AnalysisType::Structure => {
                "headings hierarchy, sections organization, and overall document structure."
            }
            AnalysisType::Content => "main themes, key concepts, arguments, and conclusions.",
            AnalysisType::Links => {
                "internal links [[]], external links, backlinks potential, and connection patterns."
            }
            AnalysisType::Tags => "existing tags, suggested tags, metadata, and categorization.",
        }
    }
}

impl FromStr for AnalysisType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structure" => Ok(AnalysisType::Structure),
            "content" => Ok(AnalysisType::Content),
            "links" => Ok(AnalysisType::Links),
            "tags" => Ok(AnalysisType::Tags),
            other => Err(DispatchError::InvalidEnumValue {
                name: "analysis_type",
                value: other.to_string(),
                allowed: ANALYSIS_TYPES,
            }),
        }
    }
}

/// Review aspects enumerated by the vault-overview prompt, in order.
pub const OVERVIEW_ASPECTS: [&str; 6] = [
    "Folder structure and organization",
    "Note naming conventions",
    "Tag usage patterns",
    "Link density and connection quality",
    "Content categories and themes",
    "Suggestions for improvement",
];

fn note_block(path: &str, content: &str) -> String {
    format!("**File Path:** {}\n\n**Content:**\n{}\n\n", path, content)
}

pub async fn note_summarizer<V>(
    vault: &V,
    args: Option<Arguments>,
) -> Result<PromptOutput, DispatchError>
where
    V: VaultApi + ?Sized,
{
    let params: NotePromptParams = args::parse(args)?;
    args::note_path(&params.path)?;
    let note = vault.get_file(&params.path).await?;

    let text = format!(
        "Please summarize the following Obsidian note:\n\n{}\
         Please provide a concise summary highlighting the main points, key concepts, \
         and any important links or references.",
        note_block(&params.path, &note.content)
    );

    Ok(PromptOutput {
        description: format!("Summarize the content of note: {}", params.path),
        messages: vec![PromptMessage::user(text)],
    })
}

/// `analysis_type` is checked before the note is fetched, so a bad value
/// never reaches the backend.
pub async fn note_analyzer<V>(
    vault: &V,
    args: Option<Arguments>,
) -> Result<PromptOutput, DispatchError>
where
    V: VaultApi + ?Sized,
{
    let params: NoteAnalyzerParams = args::parse(args)?;
    args::note_path(&params.path)?;
    let analysis: AnalysisType = params.analysis_type.parse()?;
    let note = vault.get_file(&params.path).await?;

    let text = format!(
        "Please analyze {} the following Obsidian note:\n\n{}Focus on: {}",
        analysis.subject(),
        note_block(&params.path, &note.content),
        analysis.focus()
    );

    Ok(PromptOutput {
        description: format!("Analyze {} of note: {}", analysis.as_str(), params.path),
        messages: vec![PromptMessage::user(text)],
    })
}

pub fn vault_overview() -> PromptOutput {
    let aspects = OVERVIEW_ASPECTS
        .iter()
        .enumerate()
        .map(|(i, aspect)| format!("{}. {}", i + 1, aspect))
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "Please provide an overview of the current Obsidian vault structure. \
         Analyze the organization, main categories, note relationships, and suggest \
         improvements for better knowledge management. Consider the following aspects:\n\n{}",
        aspects
    );

    PromptOutput {
        description: "Generate an overview of the Obsidian vault structure".to_string(),
        messages: vec![PromptMessage::user(text)],
    }
}
