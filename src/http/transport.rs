//! The byte stream a connection handler operates on.
//!
//! Anything that reads and writes bytes asynchronously can carry a
//! connection. Reads always take an explicit deadline, and the file-to-stream
//! copy can be specialised: TCP streams on Linux use `sendfile(2)` so file
//! bytes never pass through user space.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::BytesMut;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send + Sized {
    /// Address of the remote end, if the transport has one. Logging only.
    fn peer(&self) -> Option<SocketAddr> {
        None
    }

    /// Appends whatever arrives within `deadline` to `buf`.
    ///
    /// Returns `Ok(0)` at end of stream. A read that sees no data before the
    /// deadline fails with [`io::ErrorKind::TimedOut`].
    fn read_with_deadline(
        &mut self,
        buf: &mut BytesMut,
        deadline: Duration,
    ) -> impl Future<Output = io::Result<usize>> + Send {
        async move {
            match tokio::time::timeout(deadline, self.read_buf(buf)).await {
                Ok(res) => res,
                Err(_) => Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out")),
            }
        }
    }

    /// Copies the first `len` bytes of `file` to the stream.
    ///
    /// Returns the number of bytes actually sent, which is less than `len`
    /// only if the file ended early.
    fn send_file(
        &mut self,
        file: &mut File,
        len: u64,
    ) -> impl Future<Output = io::Result<u64>> + Send {
        async move { copy_buffered(self, file, len).await }
    }
}

/// Buffered read/write copy used when no kernel-assisted path exists.
pub async fn copy_buffered<W>(writer: &mut W, file: &mut File, len: u64) -> io::Result<u64>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut limited = (&mut *file).take(len);
    let sent = tokio::io::copy(&mut limited, writer).await?;
    writer.flush().await?;
    Ok(sent)
}

impl Transport for TcpStream {
    fn peer(&self) -> Option<SocketAddr> {
        self.peer_addr().ok()
    }

    #[cfg(target_os = "linux")]
    fn send_file(
        &mut self,
        file: &mut File,
        len: u64,
    ) -> impl Future<Output = io::Result<u64>> + Send {
        async move { sendfile_all(self, file, len).await }
    }
}

/// In-memory transport, handy for driving a handler without sockets.
impl Transport for tokio::io::DuplexStream {}

/// Largest count handed to a single `sendfile` call.
#[cfg(target_os = "linux")]
const SENDFILE_CHUNK: usize = 1 << 30;

#[cfg(target_os = "linux")]
async fn sendfile_all(stream: &TcpStream, file: &File, len: u64) -> io::Result<u64> {
    use nix::sys::sendfile::sendfile;
    use tokio::io::Interest;

    let mut offset: nix::libc::off_t = 0;
    let mut sent: u64 = 0;

    while sent < len {
        stream.writable().await?;

        let count = usize::try_from(len - sent)
            .unwrap_or(SENDFILE_CHUNK)
            .min(SENDFILE_CHUNK);

        let res = stream.try_io(Interest::WRITABLE, || {
            sendfile(stream, file, Some(&mut offset), count).map_err(io::Error::from)
        });

        match res {
            // file shrank since it was opened
            Ok(0) => break,
            Ok(n) => sent += n as u64,
            // EINTR leaves readiness set, so the next `writable` returns at once
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                continue;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(sent)
}
