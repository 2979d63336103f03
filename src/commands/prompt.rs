use std::sync::Arc;

use anyhow::Result;
use colored::*;

use obsidian_rest_mcp::client::RestClient;
use obsidian_rest_mcp::mcp::args;
use obsidian_rest_mcp::mcp::Dispatcher;

/// Render a prompt the same way an MCP client would receive it.
pub async fn run(client: RestClient, name: &str, pairs: &[String], json: bool) -> Result<()> {
    let dispatcher = Dispatcher::new(Arc::new(client));
    let arguments = args::from_pairs(pairs)?;
    let output = dispatcher.get_prompt(name, Some(arguments)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", output.description.bold());
    println!("{}", "=".repeat(60));
    for message in &output.messages {
        println!();
        println!("{}", format!("[{:?}]", message.role).to_lowercase().cyan());
        println!("{}", message.text);
    }

    Ok(())
}
