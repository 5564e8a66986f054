use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use coinwatch_api::config::ApiConfig;
use coinwatch_api::server::serve;
use coinwatch_core::StoreConfig;

#[derive(Debug, Parser)]
#[command(name = "coinwatchd", about = "Coin ticker range-query HTTP service")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "COINWATCH_ADDR", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Database file; defaults to $COINWATCH_HOME/data/coins.duckdb.
    #[arg(long, env = "COINWATCH_DB")]
    db_path: Option<PathBuf>,

    /// Idle read connections kept pooled.
    #[arg(long, default_value_t = 4)]
    max_idle_connections: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut store = StoreConfig::default();
    if let Some(db_path) = cli.db_path {
        store.db_path = db_path;
    }
    store.max_idle_connections = cli.max_idle_connections;

    let config = ApiConfig {
        bind: cli.bind,
        store,
    };

    if let Err(error) = serve(config).await {
        error!(%error, "server exited with error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .compact()
        .init();
}
