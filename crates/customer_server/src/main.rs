//! Process entry point: logging, store initialization, then serving.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use customer_core::{init_logging, initialize_store, InitMode};
use customer_server::{CustomerServer, ServerConfig};
use log::error;

#[derive(Debug, Parser)]
#[command(name = "customer_server", version, about = "Customer CRUD service over SQLite")]
struct Cli {
    /// Host to bind to
    #[arg(long, env = "CUSTOMER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind to
    #[arg(short, long, env = "CUSTOMER_PORT", default_value_t = 8080)]
    port: u16,

    /// SQLite store file
    #[arg(long, env = "CUSTOMER_DB_PATH", default_value = "customers.db")]
    db_path: PathBuf,

    /// recreate (wipe and reseed) or preserve (seed on first run only)
    #[arg(long, env = "CUSTOMER_INIT_MODE", default_value = "recreate")]
    init_mode: InitMode,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CUSTOMER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr when omitted)
    #[arg(long, env = "CUSTOMER_LOG_DIR")]
    log_dir: Option<String>,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            db_path: cli.db_path,
            init_mode: cli.init_mode,
            log_level: cli.log_level,
            log_dir: cli.log_dir,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::from(Cli::parse());

    if let Err(err) = init_logging(config.log_level(), config.log_dir.as_deref()) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    // The listener must never start against a half-built store.
    if let Err(err) = initialize_store(&config.db_path, config.init_mode) {
        error!(
            "event=store_init module=main status=error path={} error={}",
            config.db_path.display(),
            err
        );
        return ExitCode::FAILURE;
    }

    if let Err(err) = CustomerServer::with_config(config).start().await {
        error!("event=server_start module=main status=error error={err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
