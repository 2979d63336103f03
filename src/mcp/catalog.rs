//! Static tool and prompt catalogs.
//!
//! Built at compile time and never mutated; dispatch looks operations up by
//! name and matches on their kind.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GetNote,
    UpdateNote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NoteSummarizer,
    NoteAnalyzer,
    VaultOverview,
}

#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [ArgumentSpec],
    #[serde(skip)]
    pub kind: ToolKind,
}

#[derive(Debug, Serialize)]
pub struct PromptDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [ArgumentSpec],
    #[serde(skip)]
    pub kind: PromptKind,
}

pub const GET_NOTE: &str = "get-note";
pub const UPDATE_NOTE: &str = "update-note";
pub const NOTE_SUMMARIZER: &str = "note-summarizer";
pub const NOTE_ANALYZER: &str = "note-analyzer";
pub const VAULT_OVERVIEW: &str = "vault-overview";

/// Parameters for get-note
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetNoteParams {
    /// Vault-relative path, e.g. "Projects/Plan.md"
    #[schemars(description = "path to the note")]
    pub path: String,
}

/// Parameters for update-note
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateNoteParams {
    #[schemars(description = "path to the note")]
    pub path: String,
    #[schemars(description = "new content for the note")]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct NotePromptParams {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteAnalyzerParams {
    pub path: String,
    pub analysis_type: String,
}

const PATH_ARG: ArgumentSpec = ArgumentSpec {
    name: "path",
    description: "path to the note",
    required: true,
};

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: GET_NOTE,
        description: "Get the content of an Obsidian note",
        arguments: &[PATH_ARG],
        kind: ToolKind::GetNote,
    },
    ToolDescriptor {
        name: UPDATE_NOTE,
        description: "Replace the content of an Obsidian note",
        arguments: &[
            PATH_ARG,
            ArgumentSpec {
                name: "content",
                description: "new content for the note",
                required: true,
            },
        ],
        kind: ToolKind::UpdateNote,
    },
];

pub const PROMPTS: &[PromptDescriptor] = &[
    PromptDescriptor {
        name: NOTE_SUMMARIZER,
        description: "Summarize the content of an Obsidian note",
        arguments: &[ArgumentSpec {
            name: "path",
            description: "path to the note to summarize",
            required: true,
        }],
        kind: PromptKind::NoteSummarizer,
    },
    PromptDescriptor {
        name: NOTE_ANALYZER,
        description: "Analyze the structure and content of an Obsidian note",
        arguments: &[
            ArgumentSpec {
                name: "path",
                description: "path to the note to analyze",
                required: true,
            },
            ArgumentSpec {
                name: "analysis_type",
                description: "type of analysis (structure, content, links, tags)",
                required: true,
            },
        ],
        kind: PromptKind::NoteAnalyzer,
    },
    PromptDescriptor {
        name: VAULT_OVERVIEW,
        description: "Generate an overview of the Obsidian vault structure",
        arguments: &[],
        kind: PromptKind::VaultOverview,
    },
];

pub fn find_tool(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.name == name)
}

pub fn find_prompt(name: &str) -> Option<&'static PromptDescriptor> {
    PROMPTS.iter().find(|p| p.name == name)
}

impl ToolDescriptor {
    /// JSON Schema for the tool's arguments, derived from its params struct.
    pub fn input_schema(&self) -> Map<String, Value> {
        let schema = match self.kind {
            ToolKind::GetNote => schemars::schema_for!(GetNoteParams),
            ToolKind::UpdateNote => schemars::schema_for!(UpdateNoteParams),
        };
        match serde_json::to_value(schema) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let tools: HashSet<_> = TOOLS.iter().map(|t| t.name).collect();
        let prompts: HashSet<_> = PROMPTS.iter().map(|p| p.name).collect();
        assert_eq!(tools.len(), TOOLS.len());
        assert_eq!(prompts.len(), PROMPTS.len());
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(find_tool("get-note").map(|t| t.kind), Some(ToolKind::GetNote));
        assert_eq!(
            find_prompt("note-analyzer").map(|p| p.kind),
            Some(PromptKind::NoteAnalyzer)
        );
        assert!(find_tool("delete-note").is_none());
        assert!(find_prompt("get-note").is_none());
    }

    #[test]
    fn input_schema_matches_declared_arguments() {
        for tool in TOOLS {
            let schema = tool.input_schema();
            assert_eq!(schema.get("type"), Some(&Value::String("object".into())));

            let properties = schema["properties"].as_object().unwrap();
            let required: HashSet<&str> = schema["required"]
                .as_array()
                .unwrap()
                .iter()
                .filter_map(Value::as_str)
                .collect();

            for arg in tool.arguments {
                assert_eq!(properties[arg.name]["type"], "string", "{}.{}", tool.name, arg.name);
                assert_eq!(required.contains(arg.name), arg.required);
            }
            assert_eq!(properties.len(), tool.arguments.len());
        }
    }

    #[test]
    fn vault_overview_takes_no_arguments() {
        assert!(find_prompt(VAULT_OVERVIEW).unwrap().arguments.is_empty());
    }
}
