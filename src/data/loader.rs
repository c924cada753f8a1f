use std::collections::HashSet;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use super::model::{Column, ColumnData, Table};

/// Cell spellings treated as a missing value, matching the common CSV
/// conventions of dataframe libraries.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>",
    "#N/A", "#N/A N/A", "#NA", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data file not found at '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("Could not read {origin}: {cause}")]
    Unreadable {
        origin: String,
        #[source]
        cause: io::Error,
    },

    #[error("The data source contains no data rows.")]
    Empty,

    #[error("Error reading CSV file: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Loader configuration. Without an explicit delimiter, files are
/// dispatched by extension and streams default to a comma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: Option<u8>,
}

impl LoadOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    fn delimiter_for(&self, path: &Path) -> u8 {
        if let Some(d) = self.delimiter {
            return d;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "tsv" | "tab" => b'\t',
            _ => b',',
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a delimited text file.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Table, LoadError> {
    let bytes = std::fs::read(path).map_err(|cause| match cause.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            origin: format!("'{}'", path.display()),
            cause,
        },
    })?;

    let table = parse(&bytes, options.delimiter_for(path))?;
    info!(
        "Loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

/// Load a table from any byte stream. The stream is read once, to the end.
pub fn load<R: Read>(mut source: R, options: &LoadOptions) -> Result<Table, LoadError> {
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|cause| LoadError::Unreadable {
            origin: "input stream".to_string(),
            cause,
        })?;

    let table = parse(&bytes, options.delimiter.unwrap_or(b','))?;
    info!(
        "Loaded {} rows x {} columns from stream",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse(bytes: &[u8], delimiter: u8) -> Result<Table, LoadError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        LoadError::Malformed(format!("invalid UTF-8 at byte {}", e.valid_up_to()))
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    check_quotes_terminated(text, delimiter)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let raw_headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();
    if raw_headers.is_empty() {
        return Err(LoadError::Empty);
    }
    let names = normalize_headers(&raw_headers);

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Malformed(e.to_string()))?;
        for (col, field) in record.iter().enumerate() {
            cells[col].push(field.to_string());
        }
    }

    if cells.first().map_or(true, Vec::is_empty) {
        return Err(LoadError::Empty);
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| infer_column(name, raw))
        .collect();

    Table::new(columns).map_err(|e| LoadError::Malformed(e.to_string()))
}

/// Empty headers become `Unnamed: {index}`; repeated names get `.1`, `.2`, …
fn normalize_headers(raw: &csv::StringRecord) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(raw.len());

    raw.iter()
        .enumerate()
        .map(|(i, header)| {
            let base = if header.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                header.to_string()
            };
            let mut name = base.clone();
            let mut suffix = 0;
            while !taken.insert(name.clone()) {
                suffix += 1;
                name = format!("{base}.{suffix}");
            }
            name
        })
        .collect()
}

fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell.trim())
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// Numeric if every non-missing cell parses as a number (an all-missing
/// column counts as numeric), text otherwise.
fn infer_column(name: String, raw: Vec<String>) -> Column {
    let numeric: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| {
            if is_missing(cell) {
                Some(None)
            } else {
                parse_number(cell).map(|v| (!v.is_nan()).then_some(v))
            }
        })
        .collect();

    let column = match numeric {
        Some(values) => Column::new(name, ColumnData::Numeric(values)),
        None => Column::new(
            name,
            ColumnData::Text(
                raw.into_iter()
                    .map(|cell| (!is_missing(&cell)).then_some(cell))
                    .collect(),
            ),
        ),
    };
    debug!(
        "column '{}' inferred as {} ({} of {} cells present)",
        column.name(),
        column.kind(),
        column.present_count(),
        column.len()
    );
    column
}

/// The csv reader silently accepts a quote that never closes, so scan for
/// one up front. A quote only opens a quoted field at the start of a field.
fn check_quotes_terminated(text: &str, delimiter: u8) -> Result<(), LoadError> {
    let bytes = text.as_bytes();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut line = 1usize;
    let mut opened_on = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')) {
            line += 1;
        }

        if in_quotes {
            if b == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else if b == delimiter || b == b'\n' || b == b'\r' {
            field_start = true;
            i += 1;
            continue;
        } else if b == b'"' && field_start {
            in_quotes = true;
            opened_on = line;
        }

        field_start = false;
        i += 1;
    }

    if in_quotes {
        return Err(LoadError::Malformed(format!(
            "unterminated quoted field starting on line {opened_on}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;

    fn load_str(text: &str) -> Result<Table, LoadError> {
        load(text.as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn infers_numeric_and_text_columns() {
        let table = load_str("a,b,name\n1,2.5,foo\n3,-4e2,bar\n").unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("a").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(table.column("b").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(table.column("name").unwrap().kind(), ColumnKind::Text);
        assert_eq!(
            table.column("b").unwrap().numeric_values().unwrap(),
            &[Some(2.5), Some(-400.0)]
        );
    }

    #[test]
    fn missing_tokens_do_not_break_numeric_inference() {
        let table = load_str("a,b\n1,NaN\n,2\nNA,\n4, 5 \n").unwrap();

        let a = table.column("a").unwrap().numeric_values().unwrap();
        let b = table.column("b").unwrap().numeric_values().unwrap();
        assert_eq!(a, &[Some(1.0), None, None, Some(4.0)]);
        assert_eq!(b, &[None, Some(2.0), None, Some(5.0)]);
    }

    #[test]
    fn single_non_numeric_cell_makes_column_text() {
        let table = load_str("a\n1\n2\nthree\n").unwrap();
        assert_eq!(table.column("a").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn all_missing_column_is_numeric() {
        let table = load_str("a,b\n1,\n2,NA\n").unwrap();
        assert!(table.column("b").unwrap().is_numeric());
        assert_eq!(table.column("b").unwrap().present_count(), 0);
    }

    #[test]
    fn headers_are_made_unique() {
        let table = load_str("a,a,,a\n1,2,3,4\n").unwrap();
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            ["a", "a.1", "Unnamed: 2", "a.2"]
        );
    }

    #[test]
    fn header_only_source_is_empty() {
        assert!(matches!(load_str("a,b\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn blank_source_is_empty() {
        assert!(matches!(load_str(""), Err(LoadError::Empty)));
        assert!(matches!(load_str("\n\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        assert!(matches!(
            load_str("a,b\n1,2\n3\n"),
            Err(LoadError::Malformed(_))
        ));
        assert!(matches!(
            load_str("a,b\n1,2,3\n"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let err = load_str("a,b\n1,\"oops\n2,3\n").unwrap_err();
        match err {
            LoadError::Malformed(msg) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_quote_line_counts_bare_carriage_returns() {
        let err = load_str("a,b\r1,2\r3,\"oops\r4,5\r").unwrap_err();
        match err {
            LoadError::Malformed(msg) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = load_str("a,b\r\n1,2\r\n3,\"oops\r\n").unwrap_err();
        match err {
            LoadError::Malformed(msg) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn quoted_fields_with_escapes_are_accepted() {
        let table = load_str("label,v\n\"say \"\"hi\"\", ok\",1\nplain,2\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert!(table.column("v").unwrap().is_numeric());
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"a,b\n1,\xff\n";
        assert!(matches!(
            load(bytes, &LoadOptions::default()),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn custom_delimiter() {
        let opts = LoadOptions::default().with_delimiter(b';');
        let table = load("x;y\n1;2\n".as_bytes(), &opts).unwrap();
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn delimiter_follows_extension() {
        let opts = LoadOptions::default();
        assert_eq!(opts.delimiter_for(Path::new("data.tsv")), b'\t');
        assert_eq!(opts.delimiter_for(Path::new("data.CSV")), b',');
        assert_eq!(
            opts.with_delimiter(b'|').delimiter_for(Path::new("data.tsv")),
            b'|'
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = Path::new("definitely/not/here.csv");
        assert!(matches!(
            load_file(path, &LoadOptions::default()),
            Err(LoadError::NotFound { .. })
        ));
    }

    #[test]
    fn not_found_message_names_the_path() {
        let err = load_file(Path::new("nowhere/data.tsv"), &LoadOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Data file not found at 'nowhere/data.tsv'");
    }

    #[test]
    fn tsv_file_loads_with_tab_delimiter() {
        let path = std::env::temp_dir().join(format!("loader-{}.tsv", std::process::id()));
        std::fs::write(&path, "a\tb\tname\n1\t2\tx\n3\t4\ty\n").unwrap();
        let result = load_file(&path, &LoadOptions::default());
        std::fs::remove_file(&path).unwrap();

        let table = result.unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["a", "b", "name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("b").unwrap().numeric_values().unwrap(),
            &[Some(2.0), Some(4.0)]
        );
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = std::env::temp_dir();
        assert!(matches!(
            load_file(&dir, &LoadOptions::default()),
            Err(LoadError::Unreadable { .. })
        ));
    }
}
