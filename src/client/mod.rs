//! Vault client
//!
//! Authenticated access to a remote note vault (Obsidian Local REST API).

pub mod config;
pub mod error;
pub mod file;
pub mod rest;

use async_trait::async_trait;

pub use config::{ClientConfig, ResourceLayout, REQUEST_TIMEOUT};
pub use error::{VaultError, VaultResult};
pub use file::{FileStat, VaultFile};
pub use rest::{validate_path, RestClient};

/// Operations the dispatcher needs from a vault backend.
///
/// `RestClient` is the production implementation; tests substitute
/// in-memory fakes. Implementations must be safe to share across
/// concurrently running calls.
#[async_trait]
pub trait VaultApi: Send + Sync {
    /// Fetch a note with its metadata.
    async fn get_file(&self, path: &str) -> VaultResult<VaultFile>;

    /// Replace a note's content.
    async fn update_file(&self, path: &str, content: &str) -> VaultResult<()>;

    /// Create a new note.
    async fn create_file(&self, path: &str, content: &str) -> VaultResult<()>;

    /// Delete a note.
    async fn delete_file(&self, path: &str) -> VaultResult<()>;

    /// Fetch a note's raw text without metadata.
    async fn get_file_content(&self, path: &str) -> VaultResult<String>;
}
