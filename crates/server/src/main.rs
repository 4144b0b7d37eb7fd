//! Binary entry point for the styling edge service.

use anyhow::{Context, Result};
use log::info;
use ratecss_server::config::ServerConfig;
use ratecss_server::routes::router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env();
    let bind = config.bind.clone();
    let app = router(config);

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("listening on http://{bind}");
    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
