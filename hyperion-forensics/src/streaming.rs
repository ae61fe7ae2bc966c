//! SSE demultiplexing for the `/forensics/stream` endpoint.
//!
//! The backend writes report text and control signals into the same
//! `data:` channel:
//!
//! ```text
//! data: The hurricane crossed the buoy at 21:20 UTC
//!
//! data: , sustaining 45.5 m/s winds.
//!
//! data: [DONE]
//!
//! ```
//!
//! `[DONE]` ends the report; `[ERROR] <message>` aborts it. Signals are told
//! apart from text by value alone, so report text that equals `[DONE]` or
//! starts with `[ERROR]` is indistinguishable from a signal. That is a
//! limitation of the wire format and is kept as is.

use bytes::Bytes;
use futures::Stream;
use hyperion_types::{ForensicsError, ReportStream};

use crate::transport::TransportReader;

/// Prefix of a payload-carrying field line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload value signalling a complete report.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Prefix of a payload signalling a backend failure.
pub const ERROR_PREFIX: &str = "[ERROR]";

/// Blank line separating frames.
pub const FRAME_SEPARATOR: &str = "\n\n";

/// Accumulates decoded text and cuts it into complete frames.
///
/// Owned by exactly one session. Holds at most the one partial frame still
/// waiting for its separator.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: String,
    /// Byte offset before which no separator can start.
    scanned: usize,
}

impl FrameBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoded fragment.
    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Remove and return the next complete frame, without its separator.
    pub fn next_frame(&mut self) -> Option<String> {
        let sep = FRAME_SEPARATOR.as_bytes();
        let found = self.buf.as_bytes()[self.scanned..]
            .windows(sep.len())
            .position(|window| window == sep);

        match found {
            Some(offset) => {
                let end = self.scanned + offset;
                let frame = self.buf[..end].to_string();
                self.buf.drain(..end + sep.len());
                self.scanned = 0;
                Some(frame)
            }
            None => {
                self.scanned = self.buf.len().saturating_sub(sep.len() - 1);
                None
            }
        }
    }

    /// Text received but not yet part of a complete frame.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.buf
    }
}

/// Payload units of a frame, in line order.
///
/// Lines without the `data: ` prefix carry no payload and are skipped.
pub fn data_lines(frame: &str) -> impl Iterator<Item = &str> {
    frame
        .split('\n')
        .filter_map(|line| line.strip_prefix(DATA_PREFIX))
}

/// What a single payload unit means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal<'a> {
    /// The completion sentinel.
    Done,
    /// The error sentinel, with the message that follows it.
    Error(&'a str),
    /// Report text, verbatim.
    Text(&'a str),
}

impl<'a> Signal<'a> {
    /// Classify a payload unit. Exact `[DONE]` wins over the `[ERROR]`
    /// prefix, which wins over text.
    #[must_use]
    pub fn classify(unit: &'a str) -> Self {
        if unit == DONE_SENTINEL {
            Signal::Done
        } else if let Some(rest) = unit.strip_prefix(ERROR_PREFIX) {
            Signal::Error(rest.strip_prefix(' ').unwrap_or(rest))
        } else {
            Signal::Text(unit)
        }
    }
}

/// Turn a response byte stream into a [`ReportStream`] of report chunks.
///
/// The returned stream:
/// - yields each text payload unit in wire order,
/// - ends after `[DONE]`, discarding any partial frame still buffered,
/// - fails with [`ForensicsError::Remote`] on `[ERROR]`,
/// - fails with [`ForensicsError::AbnormalTermination`] if the source ends
///   before either sentinel,
/// - fails with the transport error if the source breaks.
///
/// Nothing is read ahead of the consumer: the source is pulled only when the
/// buffered frames are exhausted. Dropping the stream drops the source.
pub fn demultiplex<S, E>(byte_stream: S) -> ReportStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    ReportStream::new(async_stream::stream! {
        let mut reader = TransportReader::new(Box::pin(byte_stream));
        let mut frames = FrameBuffer::new();
        let mut delivered = 0usize;

        loop {
            let fragment = match reader.next_chunk().await {
                Ok(Some(fragment)) => fragment,
                Ok(None) => {
                    tracing::warn!(
                        delivered,
                        pending_bytes = frames.pending().len(),
                        "report stream ended without a completion signal"
                    );
                    yield Err(ForensicsError::AbnormalTermination(
                        "stream ended before a completion signal".into(),
                    ));
                    return;
                }
                Err(err) => {
                    tracing::warn!(delivered, error = %err, "report stream read failed");
                    yield Err(err);
                    return;
                }
            };

            frames.push(&fragment);

            while let Some(frame) = frames.next_frame() {
                for unit in data_lines(&frame) {
                    match Signal::classify(unit) {
                        Signal::Done => {
                            tracing::debug!(delivered, "report stream complete");
                            return;
                        }
                        Signal::Error(message) => {
                            tracing::warn!(delivered, reason = %message, "backend aborted report stream");
                            yield Err(ForensicsError::Remote {
                                message: message.to_string(),
                            });
                            return;
                        }
                        Signal::Text(text) => {
                            delivered += 1;
                            yield Ok(text.to_string());
                        }
                    }
                }
            }
        }
    })
}
