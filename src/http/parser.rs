use std::fmt;
use std::time::Duration;

use bytes::BytesMut;

use crate::http::request::Request;
use crate::http::transport::Transport;

const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Why no request could be framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingError {
    /// The header block does not fit within the header ceiling.
    HeaderTooLarge,
    /// End of stream, read error, or read timeout before the blank line.
    ConnectionClosed,
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramingError::HeaderTooLarge => f.write_str("request header block too large"),
            FramingError::ConnectionClosed => {
                f.write_str("connection closed before request was complete")
            }
        }
    }
}

impl std::error::Error for FramingError {}

/// Reads from `conn` until a complete header block has arrived and parses
/// its request line.
///
/// Every individual read is bounded by `read_timeout`. The header block,
/// terminator included, must fit in `max_header_bytes`.
pub async fn read_request<T: Transport>(
    conn: &mut T,
    max_header_bytes: usize,
    read_timeout: Duration,
) -> Result<Request, FramingError> {
    let mut buffer = BytesMut::with_capacity(max_header_bytes.min(4096));

    loop {
        let searched = buffer.len();

        match conn.read_with_deadline(&mut buffer, read_timeout).await {
            Ok(0) => {
                tracing::debug!(buffered = buffer.len(), "peer closed before end of headers");
                return Err(FramingError::ConnectionClosed);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "read failed before end of headers");
                return Err(FramingError::ConnectionClosed);
            }
        }

        // Only the tail of the previous read can begin a terminator
        let from = searched.saturating_sub(HEADERS_END.len() - 1);

        if let Some(end) = check_frame(&buffer, from, max_header_bytes)? {
            return Ok(parse_request_line(&buffer[..end]));
        }
    }
}

/// Decides whether `buf` holds a complete header block.
///
/// Returns the length of the block including its terminator, `None` if more
/// bytes are needed, or [`FramingError::HeaderTooLarge`] once the block can
/// no longer fit in `max`.
pub fn check_frame(buf: &[u8], from: usize, max: usize) -> Result<Option<usize>, FramingError> {
    match find_headers_end(buf, from) {
        Some(pos) if pos + HEADERS_END.len() <= max => Ok(Some(pos + HEADERS_END.len())),
        Some(_) => Err(FramingError::HeaderTooLarge),
        None if buf.len() >= max => Err(FramingError::HeaderTooLarge),
        None => Ok(None),
    }
}

/// Position of the first `\r\n\r\n` at or after `from`.
pub fn find_headers_end(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
        .map(|pos| pos + from)
}

/// Splits the first line of `head` into method, target and version.
///
/// Missing tokens come back as empty strings and extra tokens are ignored.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn parse_request_line(head: &[u8]) -> Request {
    let line_end = head
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(head.len());
    let line = String::from_utf8_lossy(&head[..line_end]);

    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    let version = parts.next().unwrap_or_default();

    Request::new(method, target, version)
}
