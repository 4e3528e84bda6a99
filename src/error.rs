use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a single `load` call.
///
/// Every variant is fatal for that call: no retries, no fallbacks, and no
/// cleanup of partially applied server state beyond what the COPY protocol
/// itself guarantees. Resources held by the call are released on every path.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The first line is absent or cannot be tokenized into a header row.
    #[error("no usable header row in {}", path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: Option<csv::Error>,
    },

    /// Database unreachable or authentication rejected.
    #[error("database connection failed: {0}")]
    Connection(#[source] tokio_postgres::Error),

    /// CREATE TABLE rejected, typically because the table already exists.
    /// Callers appending to an existing table should pass
    /// `create_table: false` instead of retrying.
    #[error("table creation rejected: {0}")]
    Schema(#[source] tokio_postgres::Error),

    /// Server-side COPY rejected the payload, e.g. a row with the wrong
    /// column count. The copy is all-or-nothing; no rows were applied.
    #[error("bulk copy rejected: {0}")]
    LoadData(#[source] tokio_postgres::Error),
}
