//! Credit report checkout dev server
//!
//! Serves the upload page and the `checkout-web` bundle. Session creation
//! lives in the payment backend; point the form's `data-checkout-endpoint`
//! at it when it runs elsewhere.

mod config;
mod routes;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before clap reads it
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();

    if !args.static_dir.join("pkg").is_dir() {
        tracing::warn!(
            static_dir = %args.static_dir.display(),
            "No pkg/ bundle found - build checkout-web with wasm-pack first"
        );
    }

    let app = routes::router(&args.static_dir);

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Upload page on http://{}", addr);
    tracing::info!("  GET  /        - Upload form");
    tracing::info!("  GET  /pkg/*   - Checkout WASM bundle");
    tracing::info!("  GET  /health  - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}
