//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one GET or HEAD request per
//! connection, answered with a file from the document root or a fixed error
//! response, then the connection is closed.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Frames the header block and parses the request line
//! - **`path`**: Validates request-targets and maps them onto the document root
//! - **`request`**: Request line representation and method classification
//! - **`response`**: Status codes and their canned responses
//! - **`transport`**: The stream abstraction the handler runs on
//! - **`writer`**: Writes error responses and file responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the full header block
//!        └──────┬──────┘
//!               │ Request line parsed    (peer gone → Done, nothing sent)
//!               ▼                        (too large → 400)
//!        ┌──────────────────┐
//!        │   Validating     │ ← Method and target checks (405 / 400)
//!        └──────┬───────────┘
//!               │ Path resolved
//!               ▼
//!        ┌──────────────────┐
//!        │    Serving       │ ← Open file (404), send headers and body
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │      Done        │ ← Connection closed
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use staticd::config::HandlerConfig;
//! use staticd::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(async move {
//!             let conn = Connection::new(socket, HandlerConfig::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod path;
pub mod request;
pub mod response;
pub mod transport;
pub mod writer;
