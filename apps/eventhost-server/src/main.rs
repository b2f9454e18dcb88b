use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use eventhost_server::{AppConfig, build_app, logging};
use tokio_util::sync::CancellationToken;

/// `EventHost` access gateway
#[derive(Parser)]
#[command(name = "eventhost-server", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "EVENTHOST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Run,
    /// Validate configuration and exit
    Check,
    /// Print an Argon2 hash for a static user's `password_hash`
    HashPassword {
        /// Password to hash; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::HashPassword { password } => hash_password(password),
        Commands::Check => {
            let cfg = AppConfig::load(cli.config.as_deref())?;
            build_app(&cfg)?;
            println!("configuration OK");
            Ok(())
        }
        Commands::Run => run(cli.config.as_deref()).await,
    }
}

async fn run(config: Option<&Path>) -> anyhow::Result<()> {
    let cfg = AppConfig::load(config)?;
    logging::init(&cfg.logging)?;

    let app = build_app(&cfg)?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
        }
        tracing::info!("shutdown signal received");
        on_signal.cancel();
    });

    app.serve(cancel).await
}

fn hash_password(password: Option<String>) -> anyhow::Result<()> {
    let password = if let Some(p) = password {
        p
    } else {
        read_password_from_stdin()?
    };
    anyhow::ensure!(!password.is_empty(), "password must not be empty");

    let hash = static_authn_plugin::hash_password(&password)?;
    println!("{hash}");
    Ok(())
}

fn read_password_from_stdin() -> anyhow::Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("password:");
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
