use std::path::Path;

use bytes::Bytes;
use futures::SinkExt;
use tokio::io::AsyncReadExt;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info, instrument, warn};

use crate::error::LoadError;
use crate::load::header::read_header;
use crate::schema::{plan_table, TableSpec};

const COPY_CHUNK_BYTES: usize = 64 * 1024;

/// Per-call parsing and behavior switches.
///
/// Defaults match the common comma-separated, double-quoted file. Escape
/// defaulting to the quote character means doubled quotes inside quoted
/// fields, which is what both the csv crate and PostgreSQL expect for
/// plain CSV.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub quote: u8,
    pub escape: u8,
    /// Create the destination table before copying. Pass `false` to append
    /// to a table created by an earlier call.
    pub create_table: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: b'"',
            create_table: true,
        }
    }
}

/// Outcome of one successful load.
#[derive(Debug)]
pub struct LoadSummary {
    /// Generated destination table name, prefix included.
    pub table: String,
    /// Data rows applied by COPY (the header line is not counted).
    pub rows: u64,
}

/// Creates tables from CSV headers and bulk-loads the data with COPY.
///
/// One instance holds the connection details and the table prefix, nothing
/// else. Every [`load`](CsvLoader::load) call opens its own session, runs to
/// completion or to its first error, and releases everything it acquired;
/// no state crosses calls, so the instance is freely shareable.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    host: String,
    port: u16,
    dbname: String,
    user: String,
    password: Option<String>,
    table_prefix: String,
}

impl CsvLoader {
    pub const DEFAULT_TABLE_PREFIX: &'static str = "csv_";

    pub fn new(
        host: impl Into<String>,
        port: u16,
        dbname: impl Into<String>,
        user: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            dbname: dbname.into(),
            user: user.into(),
            password,
            table_prefix: Self::DEFAULT_TABLE_PREFIX.to_string(),
        }
    }

    /// Replaces the default `csv_` table prefix.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Loads one CSV file into the database.
    ///
    /// Reads the header row, plans the destination table from it and the
    /// file name, optionally creates the table, then streams the whole file
    /// into `COPY ... FROM STDIN WITH CSV HEADER`. Data rows are never
    /// parsed client-side; the server tokenizes them with the same
    /// delimiter/quote/escape triple the header was read with and skips the
    /// header line itself.
    ///
    /// Table creation commits on its own, so a later COPY failure leaves
    /// the table in place. The COPY itself is all-or-nothing. Loading the
    /// same file again with `create_table: false` appends.
    #[instrument(level = "info", skip(self, path), fields(file = %path.as_ref().display()))]
    pub async fn load(
        &self,
        path: impl AsRef<Path>,
        options: LoadOptions,
    ) -> Result<LoadSummary, LoadError> {
        let path = path.as_ref();

        let raw_header = read_header(path, &options)?;
        let spec = plan_table(path, &raw_header, &self.table_prefix);
        debug!(table = %spec.name, columns = spec.columns.len(), "planned destination table");

        let client = self.connect().await?;

        if options.create_table {
            info!(table = %spec.name, "creating table");
            client
                .execute(spec.create_statement().as_str(), &[])
                .await
                .map_err(LoadError::Schema)?;
        }

        let rows = copy_file(&client, path, &spec, &options).await?;
        info!(table = %spec.name, rows, "load complete");
        Ok(LoadSummary {
            table: spec.name,
            rows,
        })
    }

    async fn connect(&self) -> Result<Client, LoadError> {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user);
        if let Some(password) = &self.password {
            config.password(password);
        }

        debug!(host = %self.host, port = self.port, dbname = %self.dbname, "connecting");
        let (client, connection) = config.connect(NoTls).await.map_err(LoadError::Connection)?;
        // The task ends once the client is dropped at the end of the call.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "connection task ended with error");
            }
        });
        Ok(client)
    }
}

/// Streams the raw file, header line included, into COPY FROM STDIN and
/// returns the server's row count.
async fn copy_file(
    client: &Client,
    path: &Path,
    spec: &TableSpec,
    options: &LoadOptions,
) -> Result<u64, LoadError> {
    let file_access = |source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tokio::fs::File::open(path).await.map_err(file_access)?;

    let statement = spec.copy_statement(options);
    debug!(%statement, "starting copy");
    let sink = client
        .copy_in(statement.as_str())
        .await
        .map_err(LoadError::LoadData)?;
    futures::pin_mut!(sink);

    let mut buf = vec![0u8; COPY_CHUNK_BYTES];
    loop {
        let n = file.read(&mut buf).await.map_err(file_access)?;
        if n == 0 {
            break;
        }
        sink.send(Bytes::copy_from_slice(&buf[..n]))
            .await
            .map_err(LoadError::LoadData)?;
    }
    sink.finish().await.map_err(LoadError::LoadData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_fails_before_any_connection() {
        // An unroutable host would hang or error as Connection; getting
        // FileAccess back proves the pipeline never reached the database.
        let loader = CsvLoader::new("host.invalid", 5432, "db", "nobody", None);
        let err = loader
            .load("/no/such/dir/data.csv", LoadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::FileAccess { .. }));
    }

    #[test]
    fn default_options_are_plain_csv() {
        let options = LoadOptions::default();
        assert_eq!(options.delimiter, b',');
        assert_eq!(options.quote, b'"');
        assert_eq!(options.escape, b'"');
        assert!(options.create_table);
    }
}
