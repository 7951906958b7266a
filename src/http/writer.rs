use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::http::response::{StatusCode, ok_head};
use crate::http::transport::Transport;

/// Sends the canned, bodiless response for an error `status`.
///
/// Fails without writing anything for `StatusCode::Ok`.
pub async fn write_error<T: Transport>(conn: &mut T, status: StatusCode) -> anyhow::Result<()> {
    let response = status
        .canned()
        .ok_or_else(|| anyhow::anyhow!("no canned response for {}", status.as_u16()))?;

    conn.write_all(response).await?;
    conn.flush().await?;
    Ok(())
}

/// Sends a 200 header block declaring `len` bytes and, if `include_body`
/// is set, the first `len` bytes of `file`.
///
/// Returns the number of body bytes transmitted. It falls short of `len`
/// only when the file shrank after it was measured; a failed write aborts
/// the transfer with an error.
pub async fn write_file<T: Transport>(
    conn: &mut T,
    file: &mut File,
    len: u64,
    include_body: bool,
) -> anyhow::Result<u64> {
    conn.write_all(&ok_head(len)).await?;
    conn.flush().await?;

    if !include_body || len == 0 {
        return Ok(0);
    }

    let sent = conn.send_file(file, len).await?;

    if sent < len {
        tracing::warn!(expected = len, sent, "file ended before declared length");
    }

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn write_error_refuses_ok() {
        let (mut client, mut server) = tokio::io::duplex(256);

        assert!(write_error(&mut server, StatusCode::Ok).await.is_err());
        drop(server);

        let mut sent = Vec::new();
        client.read_to_end(&mut sent).await.unwrap();
        assert!(sent.is_empty());
    }
}
