//! smboard-web - HTML dashboard and JSON API over the report builder

pub mod render;
pub mod router;

pub use router::{create_router, AppState};

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server
pub async fn run(state: Arc<AppState>, port: u16) -> Result<()> {
    let router = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    info!("Dashboard listening on http://{}", addr);
    println!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
