//! MCP layer for the vault
//!
//! Exposes a fixed catalog of tools (get-note, update-note) and prompts
//! (note-summarizer, note-analyzer, vault-overview) backed by a vault client.

pub mod args;
pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod prompts;
pub mod server;
pub mod tools;

pub use dispatch::{cancellable, Dispatcher};
pub use error::DispatchError;
pub use prompts::{PromptMessage, PromptOutput, Role};
pub use server::{run_mcp_server, VaultService};
pub use tools::ToolOutput;
