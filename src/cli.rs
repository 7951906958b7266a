use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, Mode};

/// Minimal static file server (GET and HEAD only)
#[derive(Debug, Parser)]
#[command(name = "staticd")]
#[command(version)]
pub struct Args {
    /// How each connection is isolated
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// YAML configuration file
    #[arg(short, long, env = "STATICD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to serve (defaults to the working directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// `<host> <port>`, `<host>:<port>` or `[ipv6]:<port>`
    #[arg(value_name = "ADDR")]
    pub addr: Vec<String>,
}

impl Args {
    /// Overrides `cfg` with whatever was given on the command line.
    pub fn apply(&self, cfg: &mut Config) -> anyhow::Result<()> {
        if let Some(addr) = listen_addr(&self.addr)? {
            cfg.server.listen_addr = addr;
        }
        if let Some(mode) = self.mode {
            cfg.server.mode = mode;
        }
        if let Some(root) = &self.root {
            cfg.files.root = root.clone();
        }
        Ok(())
    }
}

/// Normalises the accepted address forms into `host:port`, bracketing IPv6
/// hosts. Returns `None` when no address was given.
///
/// ```
/// # use staticd::cli::listen_addr;
/// let two = vec!["::1".to_string(), "8080".to_string()];
/// assert_eq!(listen_addr(&two).unwrap().as_deref(), Some("[::1]:8080"));
/// ```
pub fn listen_addr(parts: &[String]) -> anyhow::Result<Option<String>> {
    let (host, port) = match parts {
        [] => return Ok(None),
        [host, port] => (host.as_str(), port.as_str()),
        [single] => split_host_port(single)?,
        _ => anyhow::bail!("expected `<host> <port>` or `<host>:<port>`, got {} arguments", parts.len()),
    };

    if host.is_empty() {
        anyhow::bail!("missing host");
    }

    let port: u16 = port
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid port {:?}", port))?;

    let addr = if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    };

    Ok(Some(addr))
}

fn split_host_port(addr: &str) -> anyhow::Result<(&str, &str)> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, port) = rest
            .split_once("]:")
            .ok_or_else(|| anyhow::anyhow!("expected `[ipv6]:<port>`, got {:?}", addr))?;
        return Ok((host, port));
    }

    addr.rsplit_once(':')
        .ok_or_else(|| anyhow::anyhow!("expected `<host>:<port>`, got {:?}", addr))
}
