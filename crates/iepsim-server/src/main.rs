use anyhow::Result;
use clap::Parser;
use iepsim_core::config::ProviderConfig;
use iepsim_core::providers::llm::openai::OpenAIClient;
use iepsim_core::storage::Store;
use iepsim_server::config::ServerConfig;
use iepsim_server::server::{router, AppState};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen address, overrides IEPSIM_BIND.
    #[arg(long)]
    bind: Option<String>,
    /// SQLite database path, overrides IEPSIM_DB.
    #[arg(long)]
    db: Option<String>,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = ServerConfig::from_env();
    if let Some(bind) = args.bind {
        cfg.bind = bind;
    }
    if let Some(db) = args.db {
        cfg.db_path = db;
    }

    init_logging(&cfg.log_level);

    let provider_cfg = ProviderConfig::from_env();
    if provider_cfg.api_key.is_none() {
        // Deliberate: the service still starts so logging endpoints work,
        // model-backed endpoints will fail per call.
        tracing::warn!(event = "no_provider_credential");
    }

    let store = Store::open(Path::new(&cfg.db_path))?;
    store.init_schema()?;

    let state = AppState {
        client: Arc::new(OpenAIClient::new(&provider_cfg)?),
        store,
    };

    let addr: SocketAddr = cfg.bind.parse()?;
    tracing::info!(
        event = "server_start",
        bind = %addr,
        db = %cfg.db_path,
        model = %provider_cfg.model
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
