//! Load CSV files into PostgreSQL without writing DDL by hand.
//!
//! The destination table is planned from the file name and the header row:
//! header text is simplified into safe lowercase identifiers, every column
//! is created as `varchar`, and the data is streamed straight into the
//! server with `COPY ... FROM STDIN WITH CSV HEADER`. Rows are tokenized
//! server-side; the client never parses anything past the header.
//!
//! ```no_run
//! use csv2pg::{CsvLoader, LoadOptions};
//!
//! # async fn run() -> Result<(), csv2pg::LoadError> {
//! let loader = CsvLoader::new("localhost", 5432, "warehouse", "etl", None);
//! let summary = loader.load("survey_results.csv", LoadOptions::default()).await?;
//! println!("{} rows into {}", summary.rows, summary.table);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod load;
pub mod normalize;
pub mod schema;

pub use error::LoadError;
pub use load::{CsvLoader, LoadOptions, LoadSummary};
pub use normalize::simplify;
pub use schema::{plan_table, TableSpec};
