use anyhow::Result;
use colored::*;

use obsidian_rest_mcp::client::{RestClient, VaultApi, VaultFile};

pub async fn run(client: &RestClient, path: &str, json: bool, meta: bool) -> Result<()> {
    let file = client.get_file(path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&file)?);
    } else if meta {
        print_meta(&file);
    } else {
        print!("{}", file.content);
        if !file.content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

/// Raw text, without asking for the structured note view.
pub async fn run_raw(client: &RestClient, path: &str) -> Result<()> {
    let content = client.get_file_content(path).await?;
    print!("{}", content);
    Ok(())
}

fn print_meta(file: &VaultFile) {
    println!("{}", file.name().bold());
    println!("{}", "=".repeat(60));
    println!("Path: {}", file.path.cyan());
    if !file.folder().is_empty() {
        println!("Folder: {}", file.folder());
    }
    println!("Size: {} bytes", file.stat.size);

    if let Some(created) = file.stat.created_at() {
        println!("Created: {}", created.format("%Y-%m-%d %H:%M"));
    }
    if let Some(modified) = file.stat.modified_at() {
        println!("Modified: {}", modified.format("%Y-%m-%d %H:%M"));
    }

    println!();
    if file.tags.is_empty() {
        println!("Tags: {}", "none".dimmed());
    } else {
        let tags: Vec<String> = file.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("Tags: {}", tags.join(" ").green());
    }

    let keys = file.frontmatter_keys();
    if keys.is_empty() {
        println!("Frontmatter: {}", "none".dimmed());
    } else {
        println!("Frontmatter: {}", keys.join(", "));
    }

    let links = file.wikilinks();
    println!("Outgoing links: {}", links.len());
    for link in links.iter().take(20) {
        println!("  {} [[{}]]", "→".cyan(), link);
    }
    if links.len() > 20 {
        println!("{}", format!("  ... and {} more", links.len() - 20).dimmed());
    }
}
