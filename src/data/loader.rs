use std::fmt;
use std::io::Read;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::{LoadError, LoadResult};
use super::model::{CellValue, Dataset, Record};

/// Column name given to JSON array elements that are not objects.
pub const SCALAR_COLUMN: &str = "value";

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// The file formats the viewer understands, recognised by extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Pick a format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "CSV"),
            FileFormat::Json => write!(f, "JSON"),
        }
    }
}

/// A successfully loaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub format: FileFormat,
    pub dataset: Dataset,
    /// CSV rows dropped because the parser rejected them.
    pub skipped_rows: usize,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row followed by data rows
/// * `.json` – an array of objects, or any single value
pub fn load_file(path: &Path) -> LoadResult<Loaded> {
    let format = FileFormat::from_path(path)?;

    let loaded = match format {
        FileFormat::Csv => {
            let file = std::fs::File::open(path)?;
            let (dataset, skipped_rows) = parse_csv(file)?;
            Loaded {
                format,
                dataset,
                skipped_rows,
            }
        }
        FileFormat::Json => {
            let text = std::fs::read_to_string(path)?;
            Loaded {
                format,
                dataset: parse_json(&text)?,
                skipped_rows: 0,
            }
        }
    };

    log::info!(
        "Loaded {} {} records from {}",
        loaded.dataset.len(),
        loaded.format,
        path.display()
    );
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a header-driven CSV table.
///
/// The first row names the columns; blank lines are skipped. Every cell is
/// kept as text. Short rows produce records without the trailing keys, and
/// fields beyond the header are dropped. Rows the reader rejects (invalid
/// UTF-8) are logged and skipped, and their count is returned alongside the
/// dataset. Only a failure to read the header row is an error.
pub fn parse_csv<R: Read>(input: R) -> LoadResult<(Dataset, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    let mut skipped = 0;

    for (row_no, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("Skipping CSV row {}: {e}", row_no + 1);
                skipped += 1;
                continue;
            }
        };

        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.as_str(), CellValue::Text(cell.to_string())))
            .collect();
        records.push(record);
    }

    Ok((Dataset::new(records), skipped))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a JSON document into records.
///
/// A top-level array is used as-is, one record per element; any other value
/// becomes a single-record dataset. Objects keep their key order, other
/// elements land in a single [`SCALAR_COLUMN`] column.
pub fn parse_json(text: &str) -> LoadResult<Dataset> {
    let root: JsonValue = serde_json::from_str(text)?;

    let records = match root {
        JsonValue::Array(items) => items.iter().map(json_to_record).collect(),
        other => vec![json_to_record(&other)],
    };

    Ok(Dataset::new(records))
}

fn json_to_record(val: &JsonValue) -> Record {
    match val {
        JsonValue::Object(obj) => obj
            .iter()
            .map(|(key, v)| (key.as_str(), CellValue::from(v)))
            .collect(),
        other => [(SCALAR_COLUMN, CellValue::from(other))].into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.csv")).unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_path(Path::new("A.JSON")).unwrap(), FileFormat::Json);

        match FileFormat::from_path(Path::new("notes.txt")) {
            Err(LoadError::UnsupportedFormat(ext)) => assert_eq!(ext, "txt"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
        assert!(matches!(
            FileFormat::from_path(Path::new("no_extension")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_simple_csv() {
        let csv = "name,age\nAlice,30\n\nBob,25\n";
        let (ds, skipped) = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns(), vec!["name".to_string(), "age".to_string()]);
        assert_eq!(ds.records[1].get("name"), Some(&text("Bob")));
        assert_eq!(ds.records[0].get("age"), Some(&text("30")));
    }

    #[test]
    fn test_csv_ragged_rows_are_kept() {
        let csv = "cat,val,note\nA,3,x\nB,2\nA,4,y,extra\n";
        let (ds, skipped) = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[1].get("cat"), Some(&text("B")));
        assert_eq!(ds.records[1].get("note"), None);
        assert_eq!(ds.records[2].keys().collect::<Vec<_>>(), vec!["cat", "val", "note"]);
    }

    #[test]
    fn test_csv_invalid_utf8_rows_are_skipped() {
        let csv: &[u8] = b"a,b\n1,2\n\xff,3\n4,5\n";
        let (ds, skipped) = parse_csv(csv).unwrap();

        assert_eq!(skipped, 1);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].get("a"), Some(&text("4")));
    }

    #[test]
    fn test_csv_empty_input() {
        let (ds, skipped) = parse_csv("".as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_parse_json_array() {
        let json = r#"[
            {"name": "Alice", "age": 30, "active": true},
            {"name": "Bob", "age": null}
        ]"#;
        let ds = parse_json(json).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.columns(),
            vec!["name".to_string(), "age".to_string(), "active".to_string()]
        );
        assert_eq!(ds.records[0].get("age"), Some(&CellValue::Number(30.0)));
        assert_eq!(ds.records[0].get("active"), Some(&text("true")));
        assert_eq!(ds.records[1].get("age"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_json_single_object_is_wrapped() {
        let ds = parse_json(r#"{"z": 1, "a": "x"}"#).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.columns(), vec!["z".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_json_scalar_elements() {
        let ds = parse_json("[1, \"two\"]").unwrap();
        assert_eq!(ds.columns(), vec![SCALAR_COLUMN.to_string()]);
        assert_eq!(ds.records[1].get(SCALAR_COLUMN), Some(&text("two")));
    }

    #[test]
    fn test_invalid_json_is_parse_failure() {
        match parse_json("[{\"a\": 1},") {
            Err(LoadError::ParseFailure { format, .. }) => assert_eq!(format, FileFormat::Json),
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_json_array() {
        let ds = parse_json("[]").unwrap();
        assert!(ds.is_empty());
    }
}
