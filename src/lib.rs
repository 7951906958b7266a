//! staticd - static file server
//!
//! Serves files from a single directory over a minimal HTTP/1.1 subset,
//! isolating every connection in its own process, thread or task.

pub mod cli;
pub mod config;
pub mod http;
pub mod server;
