//! Connection supervisors.
//!
//! Each supervisor owns the listening socket and an accept loop, and runs
//! every accepted connection to completion in its own execution context:
//!
//! - [`fork`]: a child process per connection
//! - [`thread`]: an OS thread per connection
//! - [`listener`]: a tokio task per connection
//!
//! Process and thread contexts drive the handler on a private
//! single-threaded runtime, so nothing is shared between connections.

#[cfg(unix)]
pub mod fork;
pub mod listener;
pub mod thread;

use std::net::SocketAddr;

use anyhow::Context;

use crate::config::{Config, HandlerConfig, Mode};
use crate::http::connection::{Connection, Outcome};

/// Runs the supervisor selected by `cfg.server.mode` until it fails.
pub fn run(cfg: &Config) -> anyhow::Result<()> {
    match cfg.server.mode {
        #[cfg(unix)]
        Mode::Fork => fork::run(cfg),
        #[cfg(not(unix))]
        Mode::Fork => anyhow::bail!("fork mode is only available on unix"),
        Mode::Thread => thread::run(cfg),
        Mode::Task => {
            let rt = tokio::runtime::Runtime::new().context("starting runtime")?;
            rt.block_on(async {
                tokio::select! {
                    res = listener::run(cfg) => res,

                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutdown signal received");
                        Ok(())
                    }
                }
            })
        }
    }
}

pub(crate) fn bind(addr: &str) -> anyhow::Result<std::net::TcpListener> {
    let listener = std::net::TcpListener::bind(addr)
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Listening on {}", addr);
    Ok(listener)
}

/// Serves one connection on a fresh single-threaded runtime and logs how it
/// ended. Blocks until the connection is closed.
pub fn serve_isolated(stream: std::net::TcpStream, config: HandlerConfig) {
    let peer = stream.peer_addr().ok();
    report(peer, serve_blocking(stream, config));
}

fn serve_blocking(stream: std::net::TcpStream, config: HandlerConfig) -> anyhow::Result<Outcome> {
    stream.set_nonblocking(true)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting connection runtime")?;

    rt.block_on(async move {
        let stream = tokio::net::TcpStream::from_std(stream)?;
        Connection::new(stream, config).run().await
    })
}

pub(crate) fn report(peer: Option<SocketAddr>, result: anyhow::Result<Outcome>) {
    match result {
        Ok(Outcome::Silent) => tracing::debug!(?peer, "closed without a complete request"),
        Ok(Outcome::Responded { .. }) => {}
        Err(e) => tracing::warn!(?peer, "connection aborted: {:#}", e),
    }
}
