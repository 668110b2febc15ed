use thiserror::Error;

/// Source-level failures. Per-record problems are not errors; they become
/// [`Rejection`](crate::record::Rejection) values and the run continues.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}
