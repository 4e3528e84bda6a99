use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::LoadError;
use crate::load::LoadOptions;

/// Reads exactly one header row; the rest of the file stays untouched.
///
/// The reader is configured with the same delimiter/quote/escape triple the
/// COPY statement later declares, so client and server agree on
/// tokenization. When escape equals quote the file uses CSV-style doubled
/// quotes rather than a distinct escape byte.
pub fn read_header(path: &Path, options: &LoadOptions) -> Result<Vec<String>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(options.delimiter)
        .quote(options.quote);
    if options.escape == options.quote {
        builder.double_quote(true);
    } else {
        builder.double_quote(false).escape(Some(options.escape));
    }

    let mut reader = builder.from_reader(file);
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record.iter().map(str::to_string).collect()),
        Ok(false) => Err(LoadError::Header {
            path: path.to_path_buf(),
            source: None,
        }),
        Err(source) => Err(LoadError::Header {
            path: path.to_path_buf(),
            source: Some(source),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn reads_only_the_first_row() {
        let f = file_with("Name,Age\nalice,30\nbob,41\n");
        let header = read_header(f.path(), &LoadOptions::default()).unwrap();
        assert_eq!(header, vec!["Name", "Age"]);
    }

    #[test]
    fn honors_quoting_around_the_delimiter() {
        let f = file_with("\"Last,First\",Age\nx,1\n");
        let header = read_header(f.path(), &LoadOptions::default()).unwrap();
        assert_eq!(header, vec!["Last,First", "Age"]);
    }

    #[test]
    fn honors_a_custom_delimiter() {
        let f = file_with("a;b;c\n1;2;3\n");
        let options = LoadOptions {
            delimiter: b';',
            ..LoadOptions::default()
        };
        let header = read_header(f.path(), &options).unwrap();
        assert_eq!(header, vec!["a", "b", "c"]);
    }

    #[test]
    fn honors_a_distinct_escape_character() {
        let f = file_with("\"he said \\\"hi\\\"\",b\n");
        let options = LoadOptions {
            escape: b'\\',
            ..LoadOptions::default()
        };
        let header = read_header(f.path(), &options).unwrap();
        assert_eq!(header, vec!["he said \"hi\"", "b"]);
    }

    #[test]
    fn missing_file_is_a_file_access_error() {
        let err = read_header(Path::new("/no/such/file.csv"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::FileAccess { .. }));
    }

    #[test]
    fn empty_file_is_a_header_error() {
        let f = file_with("");
        let err = read_header(f.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Header { source: None, .. }));
    }
}
