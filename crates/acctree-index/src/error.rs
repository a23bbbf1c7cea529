use std::path::PathBuf;

/// Failure while decoding an account-summaries payload.
///
/// Building the index itself never fails; only getting bytes into the input
/// model can.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid account summaries JSON: {0}")]
    Json(#[from] serde_json::Error),
}
