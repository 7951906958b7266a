use std::path::PathBuf;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::HandlerConfig;
use crate::http::parser::{FramingError, read_request};
use crate::http::path::resolve;
use crate::http::request::Request;
use crate::http::response::StatusCode;
use crate::http::writer::{write_error, write_file};
use crate::http::transport::Transport;

/// One accepted connection, served exactly once and then closed.
pub struct Connection<T: Transport> {
    stream: T,
    config: HandlerConfig,
}

pub enum ConnectionState {
    Reading,
    Validating(Request),
    Serving { request: Request, path: PathBuf },
    Done(Outcome),
}

/// What the peer received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was sent; the peer went away or stalled mid-request.
    Silent,
    /// One response was sent. `body_bytes` is 0 for errors and HEAD.
    Responded { status: StatusCode, body_bytes: u64 },
}

impl<T: Transport> Connection<T> {
    pub fn new(stream: T, config: HandlerConfig) -> Self {
        Self { stream, config }
    }

    /// Drives the connection to `Done` and closes it.
    ///
    /// Consumes the connection, so the stream is released on every path. An
    /// `Err` means a write failed partway and the response was cut short.
    pub async fn run(mut self) -> anyhow::Result<Outcome> {
        let mut state = ConnectionState::Reading;

        let outcome = loop {
            state = match state {
                ConnectionState::Reading => self.read().await?,
                ConnectionState::Validating(req) => self.validate(req).await?,
                ConnectionState::Serving { request, path } => {
                    self.serve(&request, path).await?
                }
                ConnectionState::Done(outcome) => break outcome,
            };
        };

        if let Outcome::Responded { .. } = outcome {
            // peer may already be gone; the socket closes on drop regardless
            let _ = self.stream.shutdown().await;
        }

        Ok(outcome)
    }

    async fn read(&mut self) -> anyhow::Result<ConnectionState> {
        let res = read_request(
            &mut self.stream,
            self.config.max_header_bytes,
            self.config.read_timeout,
        )
        .await;

        match res {
            Ok(req) => Ok(ConnectionState::Validating(req)),
            Err(FramingError::ConnectionClosed) => Ok(ConnectionState::Done(Outcome::Silent)),
            Err(FramingError::HeaderTooLarge) => {
                tracing::debug!(limit = self.config.max_header_bytes, "header block too large");
                self.fail(StatusCode::BadRequest).await
            }
        }
    }

    async fn validate(&mut self, req: Request) -> anyhow::Result<ConnectionState> {
        if req.method().is_none() {
            self.log(&req, StatusCode::MethodNotAllowed);
            return self.fail(StatusCode::MethodNotAllowed).await;
        }

        match resolve(&self.config.root, &self.config.index, &req.target) {
            Some(path) => Ok(ConnectionState::Serving { request: req, path }),
            None => {
                self.log(&req, StatusCode::BadRequest);
                self.fail(StatusCode::BadRequest).await
            }
        }
    }

    async fn serve(&mut self, req: &Request, path: PathBuf) -> anyhow::Result<ConnectionState> {
        let mut file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "open failed");
                self.log(req, StatusCode::NotFound);
                return self.fail(StatusCode::NotFound).await;
            }
        };

        let len = match file.metadata().await {
            Ok(meta) if meta.is_file() => meta.len(),
            // directories open fine on unix but cannot be served
            Ok(_) => {
                self.log(req, StatusCode::NotFound);
                return self.fail(StatusCode::NotFound).await;
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "stat failed");
                self.log(req, StatusCode::NotFound);
                return self.fail(StatusCode::NotFound).await;
            }
        };

        let body_bytes = write_file(&mut self.stream, &mut file, len, req.wants_body())
            .await
            .with_context(|| format!("sending {}", path.display()))?;
        drop(file);

        tracing::info!(
            peer = ?self.stream.peer(),
            method = %req.method,
            target = %req.target,
            status = StatusCode::Ok.as_u16(),
            len,
            sent = body_bytes,
            "served"
        );

        Ok(ConnectionState::Done(Outcome::Responded {
            status: StatusCode::Ok,
            body_bytes,
        }))
    }

    async fn fail(&mut self, status: StatusCode) -> anyhow::Result<ConnectionState> {
        write_error(&mut self.stream, status)
            .await
            .with_context(|| format!("sending {} response", status.as_u16()))?;

        Ok(ConnectionState::Done(Outcome::Responded {
            status,
            body_bytes: 0,
        }))
    }

    fn log(&self, req: &Request, status: StatusCode) {
        tracing::info!(
            peer = ?self.stream.peer(),
            method = %req.method,
            target = %req.target,
            status = status.as_u16(),
            "rejected"
        );
    }
}
