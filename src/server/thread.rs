use std::net::TcpListener;

use crate::config::Config;
use crate::server::{bind, serve_isolated};

pub fn run(cfg: &Config) -> anyhow::Result<()> {
    serve(bind(&cfg.server.listen_addr)?, cfg)
}

/// Spawns a named thread per accepted connection and never joins it.
pub fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let handler = cfg.handler();

    loop {
        let (socket, peer) = match listener.accept() {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "accept failed");
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let config = handler.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || serve_isolated(socket, config));

        // on failure the closure, and with it the socket, is dropped
        if let Err(e) = spawned {
            tracing::warn!(%peer, error = %e, "could not spawn connection thread");
        }
    }
}
