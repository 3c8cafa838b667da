use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod protocol;
mod render;
mod repl;
mod schema;
mod session;
mod store;

use config::BuilderConfig;
use export::{CommandClipboard, DirectoryExporter};
use session::{Session, command};

#[derive(Parser)]
#[command(name = "ai-tool-builder")]
#[command(
    version,
    about = "Build function-calling tool schemas for AI APIs"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the builder session over stdio
    Serve {
        /// Serve over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
        /// Clear all tools without an explicit confirm flag
        #[arg(long)]
        yes: bool,
    },
    /// Edit tools interactively on the terminal
    Edit {
        /// Do not ask before clearing all tools
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BuilderConfig::load(cli.config.as_deref())?;

    // stdout carries the protocol, so logs go to stderr.
    let filter =
        EnvFilter::try_new(&config.session.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    match &config.source {
        Some(path) => info!("loaded config from {}", path.display()),
        None => info!("no config file found, using defaults"),
    }

    match cli.command {
        Commands::Serve { stdio, yes } => {
            if stdio {
                let mut session = build_session(&config, yes);
                run_stdio_server(&mut session)
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Edit { yes } => {
            let mut session = build_session(&config, yes);
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut reader = stdin.lock();
            let mut writer = io::stdout().lock();
            repl::run_editor(&mut session, &mut reader, &mut writer, interactive)
        }
    }
}

fn build_session(config: &BuilderConfig, yes: bool) -> Session {
    let clipboard = match &config.clipboard.command {
        Some(argv) => CommandClipboard::new(argv.clone()),
        None => CommandClipboard::detect(),
    };
    debug!(command = ?clipboard.argv(), "clipboard program");
    let exporter = DirectoryExporter::new(config.export_directory());
    debug!(directory = %exporter.directory().display(), "export directory");

    Session::new(Box::new(clipboard), Box::new(exporter))
        .with_export_filename(config.export.filename.clone())
        .with_assume_yes(yes || config.session.assume_yes)
}

fn run_stdio_server(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                warn!("skipping unparseable request: {err}");
                continue;
            }
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let response = match (method, id) {
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "capabilities": {
                        "methods": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("methods/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "methods": protocol::method_definitions()
                }
            })),
            (Some(method), Some(id)) => {
                let result = handle_command(session, method, &request);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            _ => None,
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    Ok(())
}

fn handle_command(session: &mut Session, method: &str, request: &Value) -> Value {
    let params = request.get("params").cloned().unwrap_or(Value::Null);
    let result = command::from_request(method, &params)
        .and_then(|command| session.execute(command));

    match result {
        Ok(outcome) => outcome.to_result(session.schema()),
        Err(err) => {
            warn!(method, kind = err.kind(), "command failed: {err}");
            session::error_result(&err, Some(method))
        }
    }
}
