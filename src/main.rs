use airlog::config::Config;
use airlog::server::AppState;
use airlog::vision::OpenAiVision;
use airlog::LogStore;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "airlog", about = "Aircraft maintenance log analyzer")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Override `server.bind` from the config file.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Normalize a saved model reply and print the canonical record.
    Normalize {
        /// Reply file; stdin when omitted or `-`.
        path: Option<PathBuf>,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::Serve { bind } => serve(bind),
        Command::Normalize { path } => normalize(path),
    }
}

fn serve(bind: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load().context("loading config")?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let model = OpenAiVision::from_env(&config.model)?;
    let state = AppState::new(Arc::new(LogStore::new()), Arc::new(model), config);

    tokio::runtime::Runtime::new()?.block_on(airlog::server::serve(state))
}

fn normalize(path: Option<PathBuf>) -> anyhow::Result<()> {
    let reply = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let normalized = airlog::normalize_reply(&reply)?;
    println!("{}", serde_json::to_string_pretty(&normalized.record)?);
    eprintln!("provenance: {}", normalized.provenance);
    Ok(())
}
