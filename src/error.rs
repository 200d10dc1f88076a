use thiserror::Error;

/// Failures of the catalog pipeline: artist resolution, release selection,
/// merging and deduplication.
///
/// None of these are retried. Resolution errors either need a decision from
/// the user or stop the run, malformed provider data stops the run, and an
/// `InternalConsistency` error means the merge itself is broken.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Can't find an artist matching '{0}'")]
    NotFound(String),

    #[error("{count} artists match '{query}', pick one or be more specific")]
    AmbiguousSelection { query: String, count: usize },

    #[error("'{0}' was not the artist you were looking for, be more specific")]
    SelectionDeclined(String),

    #[error("Release '{0}' has no tracks")]
    EmptyRelease(String),

    #[error("Unknown release type '{0}'")]
    UnknownReleaseType(String),

    #[error("Invalid release date '{date}' (precision '{precision}')")]
    InvalidReleaseDate { date: String, precision: String },

    #[error("Songs were lost in the process: expected {expected} distinct tracks, got {actual}")]
    InternalConsistency { expected: usize, actual: usize },

    #[error("Prompt failed: {0}")]
    Prompt(String),
}
