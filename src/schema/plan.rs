use std::path::Path;

use crate::load::LoadOptions;
use crate::normalize::simplify;

/// Type given to every generated column. Values load verbatim as text;
/// type inference is out of scope.
pub const DATA_TYPE: &str = "varchar";

/// Destination table layout planned from one file name and its header row.
///
/// `columns` is parallel to the raw header: same length, same order, one
/// entry per field. Both generated statements consume this ordering, so the
/// server maps payload fields to the same columns the table was created
/// with. Duplicate simplified names are kept as-is; PostgreSQL rejects them
/// at CREATE time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<String>,
}

/// Plans the destination table for one CSV file.
///
/// The table name is the simplified file stem behind `table_prefix`;
/// directory components and the extension carry no identity and are
/// discarded. Columns are the header fields mapped through [`simplify`].
pub fn plan_table(file_path: &Path, raw_header: &[String], table_prefix: &str) -> TableSpec {
    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    TableSpec {
        name: format!("{}{}", table_prefix, simplify(&stem)),
        columns: raw_header.iter().map(|h| simplify(h)).collect(),
    }
}

impl TableSpec {
    /// `CREATE TABLE "t" ("a" varchar,"b" varchar);`
    ///
    /// Identifiers are double-quoted so simplified names that collide with
    /// SQL keywords (`user`, `order`, ...) still work.
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("\"{}\" {}", c, DATA_TYPE))
            .collect::<Vec<_>>()
            .join(",");
        format!("CREATE TABLE \"{}\" ({});", self.name, columns)
    }

    /// `COPY "t" ("a","b") FROM STDIN WITH CSV HEADER DELIMITER ',' ...`
    ///
    /// HEADER makes the server drop the first payload line, so the raw file
    /// can be streamed whole. The delimiter/quote/escape triple must be the
    /// one the header was read with.
    pub fn copy_statement(&self, options: &LoadOptions) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "COPY \"{}\" ({}) FROM STDIN WITH CSV HEADER DELIMITER {} QUOTE {} ESCAPE {}",
            self.name,
            columns,
            char_literal(options.delimiter),
            char_literal(options.quote),
            char_literal(options.escape),
        )
    }
}

/// Renders one byte as a single-quoted SQL literal.
fn char_literal(c: u8) -> String {
    if c == b'\'' {
        "''''".to_string()
    } else {
        format!("'{}'", c as char)
    }
}
