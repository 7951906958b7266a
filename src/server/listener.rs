use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::report;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, cfg).await
}

/// Accept loop of the task supervisor, split out so tests can hand in a
/// listener bound to an ephemeral port.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let handler = cfg.handler();

    loop {
        let (socket, peer) = listener.accept().await?;
        debug!("Accepted connection from {}", peer);

        let config = handler.clone();
        tokio::spawn(async move {
            let conn = Connection::new(socket, config);
            report(Some(peer), conn.run().await);
        });
    }
}
