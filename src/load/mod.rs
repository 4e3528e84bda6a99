mod header;
mod pipeline;

pub use pipeline::{CsvLoader, LoadOptions, LoadSummary};
