use std::path::PathBuf;

use thiserror::Error;

/// Recoverable failures raised by pipeline components.
///
/// Every variant is caught at the smallest enclosing unit of work (one
/// file, one subject run) and reported; none of them should abort a batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An expected directory or file is absent. The whole run for that
    /// resource is skipped.
    #[error("missing resource: {path:?}")]
    MissingResource { path: PathBuf },

    /// A transcript or metadata table could not be loaded or is malformed.
    /// That single file is skipped and iteration continues.
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// An aggregation store could not be read back or written. No retry:
    /// the affected item is skipped (daily append) or the run is reported
    /// at the CLI boundary (subject rewrite).
    #[error("store I/O failed for {path:?}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A token that cannot be cleaned. Reported as a warning; the token is
/// dropped and utterance processing continues.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("token {token:?} contains non-text characters")]
    NonText { token: String },
}
