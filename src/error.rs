use reqwest::StatusCode;
use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the catalog pipeline.
///
/// "Artist name matched nothing" is deliberately not represented here: it
/// is a normal outcome and surfaces as [`crate::management::SearchOutcome::NotFound`].
#[derive(Debug, Error)]
pub enum Error {
    /// The client-credentials token exchange returned a non-2xx response.
    /// Fatal for the whole request.
    #[error("token exchange failed with status {status}: {body}")]
    Auth { status: StatusCode, body: String },

    /// A non-auth API call returned a non-2xx response after retries were
    /// exhausted. Carries status and body for diagnostics.
    #[error("upstream returned status {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// Transport-level failure (connect, timeout, malformed payload) after
    /// retries were exhausted.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog database failure. Fatal; never downgraded to "not found".
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// One or more per-album fetch tasks failed mid-ingestion. Nothing was
    /// written; the caller may retry the whole search.
    #[error("ingestion aborted: {failed} of {total} album fetches failed: {source}")]
    PartialIngestion {
        failed: usize,
        total: usize,
        #[source]
        source: Box<Error>,
    },
}
