use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionOptions};
use crate::site::handler::StaticFiles;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let site = Arc::new(StaticFiles::from_config(cfg)?);

    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, site, ConnectionOptions::from(&cfg.server)).await
}

/// Accept loop: one task per connection, one request per task.
pub async fn serve(
    listener: TcpListener,
    site: Arc<StaticFiles>,
    options: ConnectionOptions,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let site = Arc::clone(&site);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, site, options);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
