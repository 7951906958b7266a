use std::net::TcpListener;

use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, fork};

use crate::config::Config;
use crate::server::{bind, serve_isolated};

pub fn run(cfg: &Config) -> anyhow::Result<()> {
    serve(bind(&cfg.server.listen_addr)?, cfg)
}

/// Forks a child per accepted connection.
///
/// Must be called from a single-threaded process: the child continues with
/// only the forking thread and starts its own runtime.
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

        // SAFETY: the supervisor never spawns threads, so the child inherits
        // a consistent address space.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                drop(listener);
                serve_isolated(socket, handler);
                std::process::exit(0);
            }
            Ok(ForkResult::Parent { child }) => {
                tracing::debug!(%peer, pid = %child, "forked connection handler");
                drop(socket);
            }
            Err(e) => {
                tracing::warn!(%peer, error = %e, "fork failed");
                drop(socket);
            }
        }

        // Only reaped here: a child that exits while the loop is blocked in
        // `accept` stays a zombie until the next connection arrives.
        reap_children();
    }
}

/// Collects every child that has already exited. Never blocks.
pub fn reap_children() -> usize {
    let mut reaped = 0;

    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(status) => {
                tracing::trace!(?status, "reaped connection handler");
                reaped += 1;
            }
            // ECHILD: no children left
            Err(_) => break,
        }
    }

    reaped
}
