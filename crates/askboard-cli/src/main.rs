//! CLI entry point for Askboard.
//!
//! This binary provides the `askboard` command with subcommands for
//! running the interactive board, initializing the data directory, and
//! checking system status.

use std::sync::Arc;

use anyhow::{Context, Result};
use askboard_core::InquiryBoard;
use askboard_dialog::DialogService;
use askboard_store::{Database, InquiryStore};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod repl;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Askboard — a support inquiry board.
#[derive(Parser)]
#[command(
    name = "askboard",
    version,
    about = "Askboard — support inquiry board",
    long_about = "A support inquiry board: visitors post inquiries (optionally secret, \
                  gated by a shared password) and an operator answers them."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the inquiry board in an interactive session.
    Run,

    /// Create the data directory and initialize the database.
    Setup,

    /// Show current system status.
    Status,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => cmd_run().await,
        Commands::Setup => cmd_setup().await,
        Commands::Status => cmd_status().await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: run
// ---------------------------------------------------------------------------

async fn cmd_run() -> Result<()> {
    let config = config::load_board_config();
    init_tracing(&config.log_level);

    info!("starting askboard");

    let data_dir = std::path::Path::new(&config.data_dir);
    if !data_dir.exists() {
        std::fs::create_dir_all(data_dir).context("failed to create data directory")?;
    }

    let db_path = data_dir.join("askboard.db");
    let db = Database::open_and_migrate(db_path.clone())
        .await
        .context("failed to open database")?;
    info!(path = %db_path.display(), "store initialized");

    let store = Arc::new(InquiryStore::new(db));
    let dialogs = DialogService::new();
    let board = InquiryBoard::new(store, dialogs.clone());

    println!();
    println!("  Askboard v{}", env!("CARGO_PKG_VERSION"));
    println!("  Customer inquiry board. Type 'help' for commands, 'quit' to exit.");

    repl::Repl::new(board, dialogs).run().await?;

    info!("shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: setup
// ---------------------------------------------------------------------------

async fn cmd_setup() -> Result<()> {
    init_tracing("info");
    let config = config::load_board_config();

    println!();
    println!("  Askboard Setup");
    println!("  ==============");
    println!();

    // Step 1: Create data directory.
    let data_dir = std::path::Path::new(&config.data_dir);
    if !data_dir.exists() {
        std::fs::create_dir_all(data_dir)?;
        println!("  [+] Created data directory");
    } else {
        println!("  [=] Data directory already exists");
    }

    // Step 2: Initialize the database.
    let db_path = data_dir.join("askboard.db");
    let display_path = db_path.display().to_string();
    Database::open_and_migrate(db_path)
        .await
        .context("failed to initialize database")?;
    println!("  [+] Database initialized at {display_path}");

    println!();
    println!("  Setup complete! Run `askboard run` to open the board.");
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

async fn cmd_status() -> Result<()> {
    init_tracing("warn");
    let config = config::load_board_config();

    println!();
    println!("  Askboard Status");
    println!("  ===============");
    println!();

    // Check data directory.
    let data_dir = std::path::Path::new(&config.data_dir);
    if data_dir.exists() {
        println!("  Data directory:   OK");
    } else {
        println!("  Data directory:   MISSING (run `askboard setup`)");
    }

    // Check database and inquiry count.
    let db_path = data_dir.join("askboard.db");
    if db_path.exists() {
        match Database::open_and_migrate(db_path.clone()).await {
            Ok(db) => {
                let count = InquiryStore::new(db).count().await.unwrap_or(0);
                println!("  Database:         OK ({}, {count} inquiries)", db_path.display());
            }
            Err(e) => println!("  Database:         ERROR ({e})"),
        }
    } else {
        println!("  Database:         NOT INITIALIZED (run `askboard setup`)");
    }

    // Check config.
    let config_path = std::path::Path::new("config/default.toml");
    if config_path.exists() {
        println!("  Config:           OK ({})", config_path.display());
    } else {
        println!("  Config:           MISSING (defaults in effect)");
    }

    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
