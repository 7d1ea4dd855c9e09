//! Shelfmark HTTP server binary.
//!
//! # Responsibility
//! - Parse command-line configuration and bootstrap logging.
//! - Wire storage, dispatcher and catalog service together.
//! - Serve the catalog routes until the process is stopped.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use shelfmark_core::{
    default_log_level, init_logging, CatalogService, EmailLogChannel, NotificationDispatcher,
    Storage,
};
use shelfmark_server::app::build_router;

/// Command-line configuration for the catalog server.
#[derive(Debug, Parser)]
#[command(name = "shelfmark-server")]
#[command(about = "HTTP catalog service for books and reviews")]
#[command(version)]
struct ServerArgs {
    /// SQLite database path; `:memory:` keeps the catalog in memory.
    #[arg(long, default_value = "shelfmark.db")]
    db_path: String,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000")]
    listen: String,

    /// Log level for the rolling file log.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; file logging stays off
    /// when this is absent.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&level, log_dir) {
            eprintln!("logging setup failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("server error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ServerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let storage = if args.db_path == ":memory:" {
        Storage::open_in_memory()?
    } else {
        Storage::open(&args.db_path)?
    };
    let dispatcher = NotificationDispatcher::new(EmailLogChannel);
    let catalog = Arc::new(CatalogService::new(storage, dispatcher));

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    info!(
        "event=server_start module=server status=ok listen={} db_path={}",
        listener.local_addr()?,
        args.db_path
    );

    axum::serve(listener, build_router(catalog)).await?;
    Ok(())
}
