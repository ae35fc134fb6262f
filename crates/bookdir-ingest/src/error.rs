use std::path::PathBuf;

use thiserror::Error;

/// File-level ingest failures. Row-level problems never surface here —
/// they land in the [`crate::reader::IngestReport`] error ledger instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read CSV file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}
