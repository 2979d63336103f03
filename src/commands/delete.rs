use anyhow::Result;
use colored::*;

use obsidian_rest_mcp::client::{RestClient, VaultApi};

pub async fn run(client: &RestClient, path: &str) -> Result<()> {
    client.delete_file(path).await?;
    println!("{} {}", "✓ Deleted".green(), path.cyan());
    Ok(())
}
