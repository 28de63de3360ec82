use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use axum::Router;
use clap::Parser;
use loupe_core::config::{DEFAULT_INDEX_DIR, DEFAULT_INPUT_DIR, DEFAULT_STOPWORDS_FILE};
use loupe_server::build_app;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory holding shard-*.txt files
    #[arg(long, default_value = DEFAULT_INDEX_DIR)]
    index: PathBuf,
    /// Directory of normalized .txt files; defines doc id ordering
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    docs: PathBuf,
    /// Stopword file
    #[arg(long, default_value = DEFAULT_STOPWORDS_FILE)]
    stopwords: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app: Router = build_app(&args.index, &args.docs, &args.stopwords)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
