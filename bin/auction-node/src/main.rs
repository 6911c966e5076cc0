use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use auction_chain::JsonRpcChainClient;
use auction_pool::PoolState;
use auction_rpc::{router, AppState};
use clap::Parser;
use url::Url;

/// Command-line / environment configuration for the auction node.
///
/// Grounded on the teacher's `bin/testnet` and `bin/devnet` binaries: a
/// `clap::Parser` struct read once at startup, no reload.
#[derive(Parser)]
#[command(about = "Private order-flow auction node")]
struct Cli {
    /// JSON-RPC endpoint of the chain client (spec.md §6 `PROVIDER`).
    #[arg(long, env = "PROVIDER")]
    provider: Url,

    /// Address the HTTP/JSON surface binds to.
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen_addr: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let chain = Arc::new(JsonRpcChainClient::new(cli.provider));
    let pool = Arc::new(PoolState::new(chain));

    let stop = Arc::new(AtomicBool::new(false));
    let settlement = auction_pool::settlement::spawn(pool.clone(), stop.clone());
    let cleanup = auction_pool::cleanup::spawn(pool.clone(), stop.clone());

    let app = router(AppState::new(pool));
    let listener = tokio::net::TcpListener::bind(&cli.listen_addr).await?;
    tracing::info!(addr = %cli.listen_addr, "auction node listening");

    tokio::select! {
        result = axum::serve(listener, app) => result.map_err(Into::into),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            stop.store(true, std::sync::atomic::Ordering::Relaxed);
            settlement.abort();
            cleanup.abort();
            Ok(())
        }
    }
}
