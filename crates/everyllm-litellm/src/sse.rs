//! Incremental decoder for `text/event-stream` bodies.
//!
//! Only the `data:` field matters for completion streams; comments, event
//! names and ids are dropped.
use bytes::BytesMut;

use crate::error::LiteLlmError;

/// Payload that terminates an OpenAI-style completion stream.
pub(crate) const DONE: &str = "[DONE]";

#[derive(Debug, Default)]
pub(crate) struct SseDecoder {
    buf: BytesMut,
}

impl SseDecoder {
    /// Append raw body bytes. Carriage returns are dropped so `\r\n`
    /// framing looks like `\n` framing.
    pub(crate) fn push(&mut self, chunk: &[u8]) {
        self.buf
            .extend(chunk.iter().copied().filter(|byte| *byte != b'\r'));
    }

    /// Next complete event's data, or `None` if more bytes are needed.
    pub(crate) fn next_event(&mut self) -> Result<Option<String>, LiteLlmError> {
        while let Some(pos) = self.buf.windows(2).position(|w| w == b"\n\n") {
            let frame = self.buf.split_to(pos + 2);
            if let Some(data) = frame_data(&frame)? {
                return Ok(Some(data));
            }
        }
        Ok(None)
    }

    /// Flush a trailing event the server did not terminate with a blank line.
    pub(crate) fn finish(&mut self) -> Result<Option<String>, LiteLlmError> {
        let frame = self.buf.split();
        frame_data(&frame)
    }
}

fn frame_data(frame: &[u8]) -> Result<Option<String>, LiteLlmError> {
    let text = std::str::from_utf8(frame)
        .map_err(|e| LiteLlmError::Format(format!("stream frame is not UTF-8: {e}")))?;

    let data: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();

    if data.is_empty() {
        Ok(None)
    } else {
        Ok(Some(data.join("\n")))
    }
}
