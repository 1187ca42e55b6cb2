//! Streaming response consumption
//!
//! The service streams a generate response as newline-delimited JSON objects.
//! [`ReplyStream`] consumes the body lazily: each fragment is produced only as
//! network data arrives, a traversal consumes the connection once, and there
//! is no way to restart it.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use crate::error::OllamaError;
use crate::types::StreamChunk;

type ByteStream = Pin<Box<dyn Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>>;

/// Lazy, single-pass, forward-only sequence of incremental text fragments.
pub struct ReplyStream {
    inner: ByteStream,
    buffer: String,
    /// The service sent `done: true`; anything still buffered is ignored
    done: bool,
    /// The transport ended; the buffer is drained but not refilled
    exhausted: bool,
}

impl ReplyStream {
    pub(crate) fn new(inner: ByteStream) -> Self {
        Self {
            inner,
            buffer: String::new(),
            done: false,
            exhausted: false,
        }
    }

    /// Produce the next text fragment, or `None` when the service signalled
    /// completion or the transport ended.
    ///
    /// Each fragment is the `response` field of one newline-delimited JSON
    /// object. Malformed lines are skipped, not fatal to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error only on a mid-stream transport failure.
    pub async fn next_fragment(&mut self) -> Result<Option<String>, OllamaError> {
        loop {
            if self.done {
                return Ok(None);
            }
            if let Some(fragment) = self.take_buffered_fragment() {
                return Ok(Some(fragment));
            }
            if self.done || self.exhausted {
                return Ok(None);
            }

            match self.inner.next().await {
                Some(Ok(bytes)) => {
                    self.buffer.push_str(&String::from_utf8_lossy(&bytes));
                }
                Some(Err(e)) => {
                    debug!(error = %e, "next_fragment: transport failure mid-stream");
                    return Err(OllamaError::Transport(e));
                }
                None => {
                    // Transport ended; a trailing line without a newline still counts
                    if !self.buffer.ends_with('\n') && !self.buffer.trim().is_empty() {
                        self.buffer.push('\n');
                    }
                    self.exhausted = true;
                }
            }
        }
    }

    /// Consume the rest of the stream and concatenate every fragment.
    ///
    /// # Errors
    ///
    /// Returns an error on a mid-stream transport failure; fragments received
    /// before the failure are lost.
    pub async fn collect_text(mut self) -> Result<String, OllamaError> {
        let mut text = String::new();
        while let Some(fragment) = self.next_fragment().await? {
            text.push_str(&fragment);
        }
        Ok(text)
    }

    /// Pop the next complete parseable line out of the buffer, if any.
    ///
    /// Sets `done` when a line carries the completion flag; a final line whose
    /// `response` is empty produces no fragment of its own.
    fn take_buffered_fragment(&mut self) -> Option<String> {
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<StreamChunk>(line) {
                Ok(chunk) => {
                    trace!(fragment = %chunk.response, done = chunk.done, "stream chunk");
                    if chunk.done {
                        self.done = true;
                        if chunk.response.is_empty() {
                            return None;
                        }
                    }
                    return Some(chunk.response);
                }
                Err(e) => {
                    // Not fatal: skip the line and keep consuming
                    debug!(error = %e, "take_buffered_fragment: skipping malformed line");
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for ReplyStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyStream")
            .field("buffered", &self.buffer.len())
            .field("done", &self.done)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(chunks: Vec<&'static str>) -> ReplyStream {
        let items: Vec<Result<bytes::Bytes, reqwest::Error>> =
            chunks.into_iter().map(|c| Ok(bytes::Bytes::from(c))).collect();
        ReplyStream::new(Box::pin(futures::stream::iter(items)))
    }

    async fn fragments_of(mut stream: ReplyStream) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(fragment) = stream.next_fragment().await.unwrap() {
            out.push(fragment);
        }
        out
    }

    #[tokio::test]
    async fn test_yields_fragments_in_order() {
        let stream = stream_of(vec![
            "{\"response\":\"Hel\",\"done\":false}\n",
            "{\"response\":\"lo\",\"done\":false}\n{\"response\":\"\",\"done\":true}\n",
        ]);
        assert_eq!(fragments_of(stream).await, vec!["Hel", "lo"]);
    }

    #[tokio::test]
    async fn test_malformed_line_is_skipped() {
        let stream = stream_of(vec![
            "{\"response\":\"a\"}\nnot json at all\n{\"response\":\"b\"}\n",
        ]);
        assert_eq!(fragments_of(stream).await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_line_split_across_network_chunks() {
        let stream = stream_of(vec!["{\"respon", "se\":\"ab\"}\n", "{\"response\":\"cd\"}\n"]);
        assert_eq!(fragments_of(stream).await, vec!["ab", "cd"]);
    }

    #[tokio::test]
    async fn test_done_flag_ends_stream_early() {
        let stream = stream_of(vec![
            "{\"response\":\"x\",\"done\":true}\n{\"response\":\"never\"}\n",
        ]);
        assert_eq!(fragments_of(stream).await, vec!["x"]);
    }

    #[tokio::test]
    async fn test_trailing_line_without_newline() {
        let stream = stream_of(vec!["{\"response\":\"a\"}\n{\"response\":\"tail\"}"]);
        assert_eq!(fragments_of(stream).await, vec!["a", "tail"]);
    }

    #[tokio::test]
    async fn test_collect_text_concatenates() {
        let stream = stream_of(vec![
            "{\"response\":\"foo\"}\n{\"response\":\"bar\"}\n{\"response\":\"\",\"done\":true}\n",
        ]);
        assert_eq!(stream.collect_text().await.unwrap(), "foobar");
    }

    #[tokio::test]
    async fn test_empty_body_yields_nothing() {
        let stream = stream_of(vec![]);
        assert!(fragments_of(stream).await.is_empty());
    }
}
