//! Error types for tf-viewer
//!
//! Every stage of the `list → view → resolve → fetch → verify` chain fails with a
//! typed error carrying enough context (URL, expected vs. actual values) to log and
//! report. Nothing is retried internally:
//! - [`NetworkError`] for non-2xx statuses and transport failures
//! - [`ParseError`] when the page does not have the expected structure
//! - [`Error::FilenameMismatch`] / [`Error::TorrentNameMismatch`] for integrity failures
//! - [`Error::IndexOutOfRange`] for a bad attachment selection

use thiserror::Error;

/// Result type alias for tf-viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tf-viewer
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "site_url")
        key: Option<String>,
    },

    /// Request could not be completed or the server answered with a failure status
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Page did not have the expected structure
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Filename announced by the redirector differs from the one on the post page
    ///
    /// Both values are normalized (ampersands scrubbed) before they are stored.
    #[error("filename mismatch: expected {expected:?}, got {actual:?}")]
    FilenameMismatch {
        /// Normalized filename listed on the post page
        expected: String,
        /// Normalized filename from the disposition header
        actual: String,
    },

    /// Name declared inside the torrent metafile differs from the expected filename
    #[error("torrent name mismatch: expected {expected:?}, got {actual:?}")]
    TorrentNameMismatch {
        /// Normalized filename listed on the post page, without `.torrent`
        expected: String,
        /// Normalized name declared by the torrent metafile
        actual: String,
    },

    /// Payload expected to be a torrent metafile could not be decoded
    #[error("invalid torrent metafile: {0}")]
    InvalidTorrent(String),

    /// Attachment index has no corresponding attachment on the post
    #[error("attachment index {index} out of range (post has {len} attachments)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of attachments on the post
        len: usize,
    },
}

/// Network-level failures. Fatal, never retried.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// Connection, TLS, proxy or timeout failure
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// A URL could not be built or resolved
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// The offending URL or href
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },
}

/// Structural failures while reading a page
#[derive(Debug, Error)]
pub enum ParseError {
    /// An element the page must contain is absent
    #[error("{element} not found on {url}")]
    MissingElement {
        /// Page URL
        url: String,
        /// Human-readable description of the missing element
        element: &'static str,
    },

    /// Published-at cell did not hold a `YYYY-MM-DD HH:MM:SS` timestamp
    #[error("invalid timestamp {value:?} on {url}: {source}")]
    InvalidTimestamp {
        /// Page URL
        url: String,
        /// Text that failed to parse
        value: String,
        /// Underlying parse error
        #[source]
        source: chrono::ParseError,
    },

    /// Post link in a listing href has no query string
    #[error("href {href:?} has no query string")]
    InvalidHref {
        /// The offending href
        href: String,
    },
}

/// Convert errors to HTTP status codes for the routing layer
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - caller supplied something unusable
            Error::Config { .. } => 400,
            Error::Parse(ParseError::InvalidHref { .. }) => 400,

            // 404 Not Found - no such attachment on the post
            Error::IndexOutOfRange { .. } => 404,

            // 502 Bad Gateway - the origin site or redirector misbehaved
            Error::Network(_) => 502,
            Error::Parse(_) => 502,
            Error::FilenameMismatch { .. } => 502,
            Error::TorrentNameMismatch { .. } => 502,
            Error::InvalidTorrent(_) => 502,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Network(e) => match e {
                NetworkError::Status { .. } => "http_status",
                NetworkError::Transport { .. } => "transport_error",
                NetworkError::Body { .. } => "body_error",
                NetworkError::InvalidUrl { .. } => "invalid_url",
            },
            Error::Parse(e) => match e {
                ParseError::MissingElement { .. } => "missing_element",
                ParseError::InvalidTimestamp { .. } => "invalid_timestamp",
                ParseError::InvalidHref { .. } => "invalid_href",
            },
            Error::FilenameMismatch { .. } => "filename_mismatch",
            Error::TorrentNameMismatch { .. } => "torrent_name_mismatch",
            Error::InvalidTorrent(_) => "invalid_torrent",
            Error::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_timestamp() -> ParseError {
        let source = chrono::NaiveDateTime::parse_from_str("nope", "%Y-%m-%d %H:%M:%S")
            .expect_err("must not parse");
        ParseError::InvalidTimestamp {
            url: "http://site/board.php".into(),
            value: "nope".into(),
            source,
        }
    }

    /// Returns (Error, expected_status_code, expected_error_code) for every
    /// variant that can be built without a live client error.
    fn error_variants() -> Vec<(Error, u16, &'static str)> {
        vec![
            (
                Error::Config {
                    message: "empty".into(),
                    key: Some("site_url".into()),
                },
                400,
                "config_error",
            ),
            (
                Error::Parse(ParseError::InvalidHref {
                    href: "board.php".into(),
                }),
                400,
                "invalid_href",
            ),
            (
                Error::IndexOutOfRange { index: 3, len: 2 },
                404,
                "index_out_of_range",
            ),
            (
                Error::Network(NetworkError::Status {
                    url: "http://site/x".into(),
                    status: 403,
                }),
                502,
                "http_status",
            ),
            (
                Error::Network(NetworkError::InvalidUrl {
                    url: "::".into(),
                    source: url::Url::parse("::").unwrap_err(),
                }),
                502,
                "invalid_url",
            ),
            (
                Error::Parse(ParseError::MissingElement {
                    url: "http://site/x".into(),
                    element: "form",
                }),
                502,
                "missing_element",
            ),
            (Error::Parse(invalid_timestamp()), 502, "invalid_timestamp"),
            (
                Error::FilenameMismatch {
                    expected: "a.torrent".into(),
                    actual: "b.torrent".into(),
                },
                502,
                "filename_mismatch",
            ),
            (
                Error::TorrentNameMismatch {
                    expected: "Movie".into(),
                    actual: "Other".into(),
                },
                502,
                "torrent_name_mismatch",
            ),
            (
                Error::InvalidTorrent("truncated".into()),
                502,
                "invalid_torrent",
            ),
        ]
    }

    #[test]
    fn every_variant_maps_to_expected_status_and_code() {
        for (err, status, code) in error_variants() {
            assert_eq!(err.status_code(), status, "status for {err}");
            assert_eq!(err.error_code(), code, "code for {err}");
        }
    }

    #[test]
    fn filename_mismatch_message_carries_both_names() {
        let err = Error::FilenameMismatch {
            expected: "Movie.2021.torrent".into(),
            actual: "Other.2021.torrent".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Movie.2021.torrent"));
        assert!(msg.contains("Other.2021.torrent"));
    }

    #[test]
    fn index_out_of_range_message_names_index_and_len() {
        let msg = Error::IndexOutOfRange { index: 5, len: 2 }.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn status_error_message_names_url() {
        let err: Error = NetworkError::Status {
            url: "http://site/board.php?mode=list".into(),
            status: 500,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("HTTP 500"));
        assert!(msg.contains("http://site/board.php?mode=list"));
    }
}
