use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use obsidian_rest_mcp::client::{RestClient, VaultApi};

/// Note body from a local file, or stdin when no file is given.
fn read_content(file: Option<&Path>) -> Result<String> {
    match file {
        Some(f) => std::fs::read_to_string(f)
            .with_context(|| format!("failed to read {}", f.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read note content from stdin")?;
            Ok(buf)
        }
    }
}

pub async fn run(client: &RestClient, path: &str, file: Option<&Path>) -> Result<()> {
    let content = read_content(file)?;
    client.update_file(path, &content).await?;
    println!("{} {}", "✓ Updated".green(), path.cyan());
    Ok(())
}

pub async fn run_create(client: &RestClient, path: &str, file: Option<&Path>) -> Result<()> {
    let content = read_content(file)?;
    client.create_file(path, &content).await?;
    println!("{} {}", "✓ Created".green(), path.cyan());
    Ok(())
}
