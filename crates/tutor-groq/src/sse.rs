// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Incremental decoder for the line-delimited streaming response.
//!
//! The body arrives as arbitrary byte chunks. [`LineBuffer`] reassembles
//! complete lines across chunk boundaries, [`parse_data_line`] classifies
//! each line, and [`pump_stream`] drives both while honoring cancellation.

use std::pin::pin;

use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tutor_core::{ChunkSink, TutorError};

use crate::types::StreamFragment;

/// Terminal sentinel payload.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Accumulates raw bytes and yields complete lines.
///
/// Splitting happens on `\n` in the byte domain, so multi-byte UTF-8
/// sequences split across reads are reassembled before decoding.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` and drains every completed line, without terminators.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            lines.push(decode_line(&self.pending[start..end]));
            start = end + 1;
        }
        self.pending.drain(..start);
        lines
    }

    /// Returns the unterminated remainder, if any, and empties the buffer.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = decode_line(&self.pending);
        self.pending.clear();
        Some(line)
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Classification of one stream line.
#[derive(Debug)]
pub enum StreamLine {
    /// A text delta to hand to the caller.
    Delta(String),
    /// The terminal sentinel.
    Done,
    /// Blank lines, comments, other SSE fields, and fragments without text.
    Skip,
    /// A `data:` payload that is not valid JSON.
    Malformed(serde_json::Error),
}

pub fn parse_data_line(line: &str) -> StreamLine {
    let Some(payload) = line.strip_prefix("data:") else {
        return StreamLine::Skip;
    };
    let payload = payload.strip_prefix(' ').unwrap_or(payload);

    if payload.trim() == DONE_SENTINEL {
        return StreamLine::Done;
    }

    match serde_json::from_str::<StreamFragment>(payload) {
        Ok(fragment) => fragment
            .delta_text()
            .map(StreamLine::Delta)
            .unwrap_or(StreamLine::Skip),
        Err(e) => StreamLine::Malformed(e),
    }
}

enum LineAction {
    Emit(String),
    Continue,
    Stop,
}

fn interpret_line(line: &str) -> LineAction {
    match parse_data_line(line) {
        StreamLine::Delta(text) => LineAction::Emit(text),
        StreamLine::Done => LineAction::Stop,
        StreamLine::Skip => LineAction::Continue,
        StreamLine::Malformed(error) => {
            warn!(line = %line, error = %error, "skipping malformed stream fragment");
            LineAction::Continue
        }
    }
}

/// Reads `stream` to completion, invoking `on_chunk` for each text delta.
///
/// Reading stops at the sentinel or at end of body; a trailing unterminated
/// line is still decoded. Cancellation is checked before every read and
/// before every delivered line. Read errors are reported with every value in
/// `secrets` redacted.
pub async fn pump_stream<S, B, E>(
    stream: S,
    on_chunk: ChunkSink<'_>,
    cancel: &CancellationToken,
    secrets: &[String],
) -> Result<(), TutorError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut stream = pin!(stream);
    let mut buffer = LineBuffer::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TutorError::Cancelled),
            next = stream.next() => next,
        };

        let bytes = match next {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                return Err(TutorError::Transport {
                    message: tutor_security::redact(
                        &format!("failed to read response stream: {e}"),
                        secrets,
                    ),
                    source: Some(Box::new(e)),
                });
            }
            None => break,
        };

        for line in buffer.push(bytes.as_ref()) {
            if cancel.is_cancelled() {
                return Err(TutorError::Cancelled);
            }
            match interpret_line(&line) {
                LineAction::Emit(text) => on_chunk(&text),
                LineAction::Continue => {}
                LineAction::Stop => {
                    debug!("stream reached terminal sentinel");
                    return Ok(());
                }
            }
        }
    }

    if let Some(line) = buffer.finish() {
        if cancel.is_cancelled() {
            return Err(TutorError::Cancelled);
        }
        if let LineAction::Emit(text) = interpret_line(&line) {
            on_chunk(&text);
        }
    }
    debug!("stream ended without sentinel");
    Ok(())
}
