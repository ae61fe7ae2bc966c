//! Lazy, pull-driven report streams.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};

use crate::error::ForensicsError;

/// How a streaming session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The backend sent the completion sentinel.
    Completed,
    /// The backend sent the error sentinel with this message.
    Errored(String),
    /// The session broke off for any other reason.
    Abnormal(String),
}

/// Handle to a streaming report.
///
/// Yields payload units in wire order. The stream ends with `None` after the
/// completion sentinel, or with exactly one `Err` before ending. Chunks
/// already yielded stay valid whatever the outcome.
///
/// Dropping the handle releases the underlying connection.
pub struct ReportStream {
    inner: Pin<Box<dyn Stream<Item = Result<String, ForensicsError>> + Send>>,
    outcome: Option<StreamOutcome>,
}

impl ReportStream {
    /// Wrap a raw chunk stream.
    ///
    /// The inner stream signals success by ending and failure by yielding an
    /// `Err`; anything it produces after an `Err` is never polled.
    pub fn new(inner: impl Stream<Item = Result<String, ForensicsError>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(inner),
            outcome: None,
        }
    }

    /// The terminal state, once the stream has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<&StreamOutcome> {
        self.outcome.as_ref()
    }

    /// Whether the stream has reached a terminal state.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    /// Drain the stream and concatenate every payload unit.
    ///
    /// Fails with the stream's error, discarding the partial text.
    pub async fn collect_text(mut self) -> Result<String, ForensicsError> {
        let mut text = String::new();
        while let Some(chunk) = self.next().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }
}

impl Stream for ReportStream {
    type Item = Result<String, ForensicsError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.outcome.is_some() {
            return Poll::Ready(None);
        }
        let polled = self.inner.as_mut().poll_next(cx);
        match &polled {
            Poll::Ready(None) => self.outcome = Some(StreamOutcome::Completed),
            Poll::Ready(Some(Err(ForensicsError::Remote { message }))) => {
                self.outcome = Some(StreamOutcome::Errored(message.clone()));
            }
            Poll::Ready(Some(Err(err))) => {
                self.outcome = Some(StreamOutcome::Abnormal(err.to_string()));
            }
            Poll::Ready(Some(Ok(_))) | Poll::Pending => {}
        }
        polled
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.outcome.is_some() {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl fmt::Debug for ReportStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportStream")
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
