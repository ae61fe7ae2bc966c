//! Incremental text decoding over a response byte stream.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use hyperion_types::ForensicsError;

/// Pulls byte chunks from a source and hands back decoded text fragments.
///
/// Decoding is stateful: a UTF-8 sequence split across two reads is held
/// back until its remaining bytes arrive, so fragments never contain
/// replacement characters for split input. No retries are attempted; the
/// first source error ends the reader.
pub struct TransportReader<S> {
    source: S,
    /// Undecoded tail of the previous read, at most three bytes of an
    /// incomplete sequence.
    pending: Vec<u8>,
    finished: bool,
}

impl<S, E> TransportReader<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    /// Wrap a byte source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: Vec::new(),
            finished: false,
        }
    }

    /// Pull the next decoded fragment.
    ///
    /// Returns `Ok(None)` once the source is exhausted. After an error or
    /// exhaustion every further call returns `Ok(None)` without touching the
    /// source.
    pub async fn next_chunk(&mut self) -> Result<Option<String>, ForensicsError> {
        while !self.finished {
            match self.source.next().await {
                Some(Ok(bytes)) => {
                    if let Some(text) = self.decode(&bytes)? {
                        return Ok(Some(text));
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(ForensicsError::Network(Box::new(e)));
                }
                None => {
                    self.finished = true;
                    if !self.pending.is_empty() {
                        return Err(ForensicsError::InvalidResponse(format!(
                            "stream ended inside a UTF-8 sequence ({} dangling bytes)",
                            self.pending.len()
                        )));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Decode as much of `pending + bytes` as forms complete characters.
    fn decode(&mut self, bytes: &[u8]) -> Result<Option<String>, ForensicsError> {
        self.pending.extend_from_slice(bytes);
        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            // Truncated sequence at the end: keep it for the next read.
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                self.finished = true;
                return Err(ForensicsError::InvalidResponse(format!(
                    "UTF-8 decode error: {e}"
                )));
            }
        };
        let tail = self.pending.split_off(valid);
        let decoded = std::mem::replace(&mut self.pending, tail);
        if decoded.is_empty() {
            return Ok(None);
        }
        String::from_utf8(decoded)
            .map(Some)
            .map_err(|e| ForensicsError::InvalidResponse(format!("UTF-8 decode error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::stream;
    use std::io;

    fn ok(bytes: &'static [u8]) -> Result<Bytes, io::Error> {
        Ok(Bytes::from_static(bytes))
    }

    fn reader(
        parts: Vec<Result<Bytes, io::Error>>,
    ) -> TransportReader<impl Stream<Item = Result<Bytes, io::Error>> + Unpin> {
        TransportReader::new(stream::iter(parts))
    }

    fn drain<S>(mut r: TransportReader<S>) -> Result<Vec<String>, ForensicsError>
    where
        S: Stream<Item = Result<Bytes, io::Error>> + Unpin,
    {
        block_on(async {
            let mut out = Vec::new();
            while let Some(chunk) = r.next_chunk().await? {
                out.push(chunk);
            }
            Ok::<_, ForensicsError>(out)
        })
    }

    #[test]
    fn passes_ascii_through() {
        let out = drain(reader(vec![ok(b"data: hel"), ok(b"lo\n\n")])).unwrap();
        assert_eq!(out, vec!["data: hel", "lo\n\n"]);
    }

    #[test]
    fn reassembles_split_multibyte_character() {
        // "é" is 0xC3 0xA9; "🌀" is four bytes.
        let out = drain(reader(vec![
            ok(b"caf\xC3"),
            ok(b"\xA9 \xF0\x9F"),
            ok(b"\x8C"),
            ok(b"\x80!"),
        ]))
        .unwrap();
        assert_eq!(out.concat(), "café 🌀!");
        assert!(out.iter().all(|s| !s.contains('\u{FFFD}')));
    }

    #[test]
    fn fragment_holding_only_a_partial_char_is_skipped() {
        let out = drain(reader(vec![ok(b"\xE2"), ok(b"\x82"), ok(b"\xAC")])).unwrap();
        assert_eq!(out, vec!["€"]);
    }

    #[test]
    fn invalid_utf8_is_invalid_response() {
        let err = drain(reader(vec![ok(b"ok"), ok(b"\xFF\xFE")])).unwrap_err();
        assert!(matches!(err, ForensicsError::InvalidResponse(_)));
    }

    #[test]
    fn dangling_bytes_at_end_are_invalid_response() {
        let err = drain(reader(vec![ok(b"abc\xF0\x9F")])).unwrap_err();
        assert!(matches!(err, ForensicsError::InvalidResponse(m) if m.contains("2 dangling")));
    }

    #[test]
    fn source_error_is_network_and_final() {
        let mut r = reader(vec![
            ok(b"first"),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            ok(b"never"),
        ]);
        block_on(async {
            assert_eq!(r.next_chunk().await.unwrap().as_deref(), Some("first"));
            assert!(matches!(
                r.next_chunk().await,
                Err(ForensicsError::Network(_))
            ));
            assert!(r.next_chunk().await.unwrap().is_none());
        });
    }
}
