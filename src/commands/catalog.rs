use anyhow::Result;
use colored::*;
use serde_json::json;

use obsidian_rest_mcp::mcp::catalog::{ArgumentSpec, PROMPTS, TOOLS};

pub fn run(json: bool) -> Result<()> {
    if json {
        let output = json!({ "tools": TOOLS, "prompts": PROMPTS });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Tools".bold());
    println!("{}", "=".repeat(60));
    for tool in TOOLS {
        print_entry(tool.name, tool.description, tool.arguments);
    }

    println!();
    println!("{}", "Prompts".bold());
    println!("{}", "=".repeat(60));
    for prompt in PROMPTS {
        print_entry(prompt.name, prompt.description, prompt.arguments);
    }

    Ok(())
}

fn print_entry(name: &str, description: &str, arguments: &[ArgumentSpec]) {
    println!("  {} - {}", name.green(), description);
    for arg in arguments {
        let marker = if arg.required { "required" } else { "optional" };
        println!(
            "      {} ({}) {}",
            arg.name.cyan(),
            marker,
            arg.description.dimmed()
        );
    }
}
