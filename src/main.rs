//! substack-mcp Server & CLI
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Exposes eight tools against the Substack API: own-profile lookup, post and
//! note listing, post and comment retrieval, note publishing (with or without
//! a link attachment), and a multi-step draft-post creation workflow.

mod cli;
mod config;
mod error;
mod http;
mod mcp;
mod substack;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::AppError;
use substack::client::SubstackClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let command = match cli.command {
        Some(command) => command,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match execute_command(command).await {
        Ok(output) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

/// Execute a CLI subcommand against a fresh client
async fn execute_command(command: Commands) -> Result<serde_json::Value, AppError> {
    let config = Config::from_env()?;
    let client = SubstackClient::new(&config);

    match command {
        Commands::GetOwnProfile(_) => tools::profile::execute_own_profile(&client).await,
        Commands::GetProfilePosts(args) => {
            tools::profile::execute_profile_posts(&client, args).await
        }
        Commands::CreateNote(args) => tools::note::execute_create_note(&client, args).await,
        Commands::CreateNoteWithLink(args) => {
            tools::note::execute_create_note_with_link(&client, args).await
        }
        Commands::GetPost(args) => tools::post::execute_post(&client, args).await,
        Commands::GetPostComments(args) => {
            tools::post::execute_post_comments(&client, args).await
        }
        Commands::GetNotes(args) => tools::profile::execute_notes(&client, args).await,
        Commands::CreatePost(args) => {
            tools::create_post::execute_create_post(&client, &config, args).await
        }
    }
}

/// Map AppError to exit code
fn exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput(_) | AppError::Config(_) | AppError::UnknownTool(_) => 1,
        AppError::Network(_) | AppError::Api(_) => 2,
        AppError::Parse(_) => 3,
        AppError::ImageUpload(_) | AppError::Internal(_) => 5,
    }
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Initialize logging to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    info!("Starting substack-mcp Server v{}", env!("CARGO_PKG_VERSION"));

    mcp::handle_stdio().await?;

    Ok(())
}
