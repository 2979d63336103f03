//! obsidian-rest-mcp library
//!
//! Exposes an Obsidian Local REST API vault to MCP clients.
//!
//! # Modules
//!
//! - `client`: Authenticated REST client and the vault file model
//! - `mcp`: Tool/prompt catalog, dispatcher, and rmcp server binding

pub mod client;
#[cfg(feature = "mcp")]
pub mod mcp;

// Re-exports for convenience
pub use client::{
    ClientConfig, FileStat, ResourceLayout, RestClient, VaultApi, VaultError, VaultFile,
    VaultResult,
};
#[cfg(feature = "mcp")]
pub use mcp::{DispatchError, Dispatcher, VaultService};
