//! Streaming response decoding.
//!
//! The endpoint answers with newline-delimited SSE-style frames. Only lines
//! prefixed with `data:` carry content; the literal `[DONE]` payload ends the
//! stream. Frames that fail to parse are logged and skipped — a malformed
//! frame must never abort an otherwise healthy stream. Correctness of the
//! final text depends entirely on appending chunks in arrival order.

use futures_util::StreamExt;
use memchr::memchr;

use crate::api::ChatResponse;
use crate::core::error::{Error, Result};

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// Accumulates `data:` frames into the final response text.
///
/// Bytes are buffered until a full line is available; a trailing partial line
/// waits for the next chunk. Once `[DONE]` is seen, all further input is
/// ignored.
#[derive(Default)]
pub struct SseAccumulator {
    buffer: Vec<u8>,
    text: String,
    done: bool,
}

impl SseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed a chunk of raw bytes, processing every complete line it finishes.
    pub fn push_bytes(&mut self, chunk: &[u8]) {
        if self.done {
            return;
        }
        self.buffer.extend_from_slice(chunk);
        while let Some(newline_pos) = memchr(b'\n', &self.buffer) {
            let line = self.buffer[..newline_pos].to_vec();
            self.buffer.drain(..=newline_pos);
            match std::str::from_utf8(&line) {
                Ok(text) => self.push_line(text),
                Err(e) => tracing::warn!("invalid UTF-8 in stream line: {e}"),
            }
            if self.done {
                return;
            }
        }
    }

    /// Feed one decoded line. Non-`data:` lines (event types, comments, blank
    /// separators) are ignored.
    pub fn push_line(&mut self, line: &str) {
        if self.done {
            return;
        }
        // The prefix must start the line; indented lines are not data frames.
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        let payload = payload.trim();
        if payload == DONE_SENTINEL {
            self.done = true;
            return;
        }
        match serde_json::from_str::<ChatResponse>(payload) {
            Ok(frame) => {
                if let Some(choice) = frame.choices.first() {
                    if !choice.message.content.is_empty() {
                        self.text.push_str(&choice.message.content);
                    }
                }
            }
            Err(e) => tracing::warn!("skipping malformed stream frame: {e}"),
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Drain an HTTP response body into the accumulated text.
///
/// Fails only when the underlying byte stream errors; parse failures inside
/// individual frames are absorbed by the accumulator.
pub async fn collect_response(response: reqwest::Response) -> Result<String> {
    let mut stream = response.bytes_stream();
    let mut accumulator = SseAccumulator::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Error::StreamRead)?;
        accumulator.push_bytes(&chunk);
        if accumulator.is_done() {
            break;
        }
    }
    Ok(accumulator.into_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_frame(content: &str) -> String {
        format!(r#"data: {{"choices":[{{"message":{{"content":"{content}"}}}}]}}"#)
    }

    #[test]
    fn accumulates_chunks_in_arrival_order_and_stops_at_done() {
        let mut acc = SseAccumulator::new();
        acc.push_line("event: x");
        acc.push_line(&content_frame("Hel"));
        acc.push_line(&content_frame("lo"));
        acc.push_line("data: [DONE]");
        acc.push_line(&content_frame("ignored"));

        assert!(acc.is_done());
        assert_eq!(acc.into_text(), "Hello");
    }

    #[test]
    fn malformed_frame_is_skipped_not_fatal() {
        let mut acc = SseAccumulator::new();
        acc.push_line(&content_frame("Hel"));
        acc.push_line("data: {not json at all");
        acc.push_line(&content_frame("lo"));

        assert_eq!(acc.into_text(), "Hello");
    }

    #[test]
    fn non_data_lines_are_ignored() {
        let mut acc = SseAccumulator::new();
        acc.push_line("");
        acc.push_line(": keep-alive comment");
        acc.push_line("event: message");
        acc.push_line("id: 7");
        assert_eq!(acc.into_text(), "");
    }

    #[test]
    fn prefix_spacing_variants_are_accepted() {
        let mut acc = SseAccumulator::new();
        acc.push_line(r#"data:{"choices":[{"message":{"content":"a"}}]}"#);
        acc.push_line(r#"data:  {"choices":[{"message":{"content":"b"}}]}"#);
        acc.push_line("data:[DONE]");
        assert!(acc.is_done());
        assert_eq!(acc.into_text(), "ab");
    }

    #[test]
    fn indented_data_lines_are_not_frames() {
        let mut acc = SseAccumulator::new();
        acc.push_line(&format!("  {}", content_frame("a")));
        acc.push_line(&format!("\t{}", content_frame("b")));
        acc.push_line("   data: [DONE]");
        assert!(!acc.is_done());
        assert_eq!(acc.into_text(), "");
    }

    #[test]
    fn frames_without_choices_or_content_contribute_nothing() {
        let mut acc = SseAccumulator::new();
        acc.push_line(r#"data: {"choices":[]}"#);
        acc.push_line(r#"data: {"choices":[{"message":{"content":""}}]}"#);
        acc.push_line(r#"data: {}"#);
        assert_eq!(acc.into_text(), "");
    }

    #[test]
    fn byte_feeding_reassembles_lines_across_chunk_boundaries() {
        let mut acc = SseAccumulator::new();
        let frame = format!("{}\n{}\n", content_frame("Hel"), content_frame("lo"));
        let bytes = frame.as_bytes();

        // Feed one byte at a time to exercise the partial-line buffer.
        for b in bytes {
            acc.push_bytes(std::slice::from_ref(b));
        }
        acc.push_bytes(b"data: [DONE]\n");

        assert!(acc.is_done());
        assert_eq!(acc.into_text(), "Hello");
    }

    #[test]
    fn bytes_after_done_are_dropped() {
        let mut acc = SseAccumulator::new();
        acc.push_bytes(b"data: [DONE]\n");
        acc.push_bytes(content_frame("late").as_bytes());
        acc.push_bytes(b"\n");
        assert_eq!(acc.into_text(), "");
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut acc = SseAccumulator::new();
        acc.push_bytes(&[0xff, 0xfe, b'\n']);
        acc.push_bytes(content_frame("ok").as_bytes());
        acc.push_bytes(b"\n");
        assert_eq!(acc.into_text(), "ok");
    }
}
