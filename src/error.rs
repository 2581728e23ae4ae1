//! Error taxonomy for the data access layer.
//!
//! Library modules return typed errors via `thiserror`; the demo binary
//! wraps them with `anyhow` at the edge. [`TmdbError`] classifies every
//! remote failure, [`StoreError`] covers the local store backend, and the
//! top-level [`Error`] aggregates both for repository callers.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error surfaced by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote client failure (see [`TmdbError`] for the classification).
    #[error(transparent)]
    Remote(#[from] TmdbError),

    /// Local store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Classified failure of a single remote API call.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The base URL or path could not be assembled into a valid URL.
    /// Raised at construction time, before any request is sent.
    #[error("invalid API URL")]
    InvalidUrl,

    /// No usable response: connectivity loss, refused connection, timeout.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response whose body could not be decoded into the expected
    /// payload (malformed JSON, missing required field, empty body).
    #[error("response decoding failed: {0}")]
    Decoding(#[source] serde_json::Error),

    /// A non-2xx response reported by the remote API. `message` is taken
    /// from the standard error envelope when that envelope decodes.
    #[error("API error {status_code}: {}", message.as_deref().unwrap_or("unknown error"))]
    Api {
        status_code: u16,
        message: Option<String>,
    },

    /// Catch-all for failures outside the classes above.
    #[error("unknown error")]
    Unknown,
}

impl TmdbError {
    /// Whether the retry loop may re-attempt the request. Only transport
    /// failures and server-side (5xx) API errors qualify; malformed
    /// payloads and 4xx responses surface immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            TmdbError::Network(_) => true,
            TmdbError::Api { status_code, .. } => (500..=599).contains(status_code),
            _ => false,
        }
    }
}

/// Failure reported by a local store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}
