//! Message codec for the MCP stdio transport.
//!
//! Frame format: one JSON-RPC message per line, UTF-8, terminated by `\n`.
//! Messages never contain embedded newlines.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// One inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A complete line, trailing newline stripped.
    Message(String),
    /// A line longer than the configured maximum. Its bytes were discarded.
    TooLarge(usize),
}

/// Read the next non-blank line.
///
/// Returns `None` on clean EOF. Lines over `max_message_bytes` are drained and
/// reported as [`Inbound::TooLarge`] so the session can continue.
pub async fn read_message<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    max_message_bytes: usize,
) -> std::io::Result<Option<Inbound>> {
    loop {
        let mut buf = Vec::new();
        let limit = max_message_bytes as u64 + 1;
        let read = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
        if read == 0 {
            return Ok(None);
        }

        if buf.last() != Some(&b'\n') && buf.len() > max_message_bytes {
            let discarded = buf.len() + discard_line(reader).await?;
            return Ok(Some(Inbound::TooLarge(discarded)));
        }

        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        return Ok(Some(Inbound::Message(
            String::from_utf8_lossy(&buf).into_owned(),
        )));
    }
}

/// Skip the rest of the current line without buffering it.
///
/// Returns the number of bytes consumed, including the newline if one was found.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<usize> {
    let mut discarded = 0;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(discarded);
        }
        let (used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (available.len(), false),
        };
        reader.consume(used);
        discarded += used;
        if done {
            return Ok(discarded);
        }
    }
}

/// Write one message followed by a newline, then flush.
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &Value,
) -> std::io::Result<()> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
