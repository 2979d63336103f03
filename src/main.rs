mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use obsidian_rest_mcp::client::{ClientConfig, ResourceLayout, RestClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "obsidian-mcp")]
#[command(about = "Obsidian vault access over the Local REST API, as CLI and MCP server", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "OBSIDIAN_BASE_URL", default_value = "https://127.0.0.1:27124", help = "Base URL of the Local REST API")]
    base_url: String,

    #[arg(long, env = "OBSIDIAN_API_KEY", hide_env_values = true, default_value = "", help = "API key sent as a bearer token")]
    api_key: String,

    #[arg(long, env = "OBSIDIAN_INSECURE_SKIP_VERIFY", help = "Skip TLS certificate verification")]
    insecure: bool,

    #[arg(long, env = "OBSIDIAN_LAYOUT", default_value = "flat", help = "Resource layout: flat (/vault/{path}) or files (/vault/files/{path})")]
    layout: ResourceLayout,

    #[arg(long, env = "OBSIDIAN_MCP_LOG", default_value = "info", help = "Log level (trace, debug, info, warn, error)")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // ===== Notes =====
    /// Print a note
    Get {
        path: String,
        #[arg(long, help = "Print the full note with metadata as JSON")]
        json: bool,
        #[arg(long, help = "Print a metadata summary instead of content")]
        meta: bool,
    },
    /// Print a note's raw text
    Cat { path: String },
    /// Replace a note's content
    Put {
        path: String,
        #[arg(long, short, help = "Read content from file (default: stdin)")]
        file: Option<PathBuf>,
    },
    /// Create a new note (files layout only)
    Create {
        path: String,
        #[arg(long, short, help = "Read content from file (default: stdin)")]
        file: Option<PathBuf>,
    },
    /// Delete a note
    Delete { path: String },

    // ===== MCP =====
    /// Render a prompt from the MCP catalog
    #[cfg(feature = "mcp")]
    Prompt {
        name: String,
        #[arg(long = "arg", short, help = "Prompt argument as key=value (repeatable)")]
        args: Vec<String>,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// List MCP tools and prompts
    #[cfg(feature = "mcp")]
    Catalog {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Start MCP server on stdio
    #[cfg(feature = "mcp")]
    Mcp {
        #[arg(long, help = "Show MCP client configuration instructions")]
        install: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(format!("obsidian_rest_mcp={}", level))
        .unwrap_or_else(|_| EnvFilter::new("obsidian_rest_mcp=info"));

    // stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = ClientConfig::new(cli.base_url, cli.api_key)
        .with_verify_tls(!cli.insecure)
        .with_layout(cli.layout);

    #[cfg(feature = "mcp")]
    match &cli.command {
        Commands::Catalog { json } => return commands::catalog::run(*json),
        Commands::Mcp { install: true } => {
            print_mcp_install_instructions(&config);
            return Ok(());
        }
        _ => {}
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(cli.command, config))
}

async fn run(command: Commands, config: ClientConfig) -> anyhow::Result<()> {
    #[cfg(feature = "mcp")]
    if let Commands::Mcp { .. } = command {
        return obsidian_rest_mcp::mcp::run_mcp_server(config).await;
    }

    let client = RestClient::new(config)?;

    match command {
        Commands::Get { path, json, meta } => commands::get::run(&client, &path, json, meta).await,
        Commands::Cat { path } => commands::get::run_raw(&client, &path).await,
        Commands::Put { path, file } => commands::put::run(&client, &path, file.as_deref()).await,
        Commands::Create { path, file } => {
            commands::put::run_create(&client, &path, file.as_deref()).await
        }
        Commands::Delete { path } => commands::delete::run(&client, &path).await,

        #[cfg(feature = "mcp")]
        Commands::Prompt { name, args, json } => {
            commands::prompt::run(client, &name, &args, json).await
        }
        #[cfg(feature = "mcp")]
        Commands::Catalog { json } => commands::catalog::run(json),
        #[cfg(feature = "mcp")]
        Commands::Mcp { .. } => Ok(()),
    }
}

#[cfg(feature = "mcp")]
fn print_mcp_install_instructions(config: &ClientConfig) {
    use colored::Colorize;

    let binary_path = std::env::current_exe()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| "obsidian-mcp".to_string());

    println!("{}", "MCP Server Installation Guide".bold().cyan());
    println!();
    println!("Add the following to your MCP client configuration:");
    println!();
    println!(r#"{{
  "mcpServers": {{
    "obsidian": {{
      "command": "{}",
      "args": ["mcp"],
      "env": {{
        "OBSIDIAN_BASE_URL": "{}",
        "OBSIDIAN_API_KEY": "<your Local REST API key>",
        "OBSIDIAN_INSECURE_SKIP_VERIFY": "{}",
        "OBSIDIAN_LAYOUT": "{}"
      }}
    }}
  }}
}}"#, binary_path, config.base_url, !config.verify_tls, config.layout);
    println!();
    println!("{}", "Available tools:".bold());
    println!("  • {} - Get note content", "get-note".green());
    println!("  • {} - Replace note content", "update-note".green());
    println!("{}", "Available prompts:".bold());
    println!("  • {} - Summarize a note", "note-summarizer".green());
    println!("  • {} - Analyze a note (structure, content, links, tags)", "note-analyzer".green());
    println!("  • {} - Review the vault's organization", "vault-overview".green());
}
