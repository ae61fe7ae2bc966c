//! Internal error helpers for mapping HTTP/reqwest errors to [`ForensicsError`].

use hyperion_types::ForensicsError;

/// Map a non-success HTTP status and its body to a [`ForensicsError`].
///
/// The status code is authoritative; the body is kept verbatim whatever its
/// content type.
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: String) -> ForensicsError {
    ForensicsError::Backend {
        status: status.as_u16(),
        body,
    }
}

/// Map a [`reqwest::Error`] to a [`ForensicsError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ForensicsError {
    if err.is_decode() {
        ForensicsError::InvalidResponse(err.to_string())
    } else {
        ForensicsError::Network(Box::new(err))
    }
}
