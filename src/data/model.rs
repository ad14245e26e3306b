use std::fmt;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. CSV cells are always `Text`; JSON input
/// maps `null` to `Empty` and numbers to `Number`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&JsonValue> for CellValue {
    fn from(val: &JsonValue) -> Self {
        match val {
            JsonValue::Null => CellValue::Empty,
            JsonValue::Number(n) => match n.as_f64() {
                Some(v) => CellValue::Number(v),
                None => CellValue::Text(n.to_string()),
            },
            JsonValue::String(s) => CellValue::Text(s.clone()),
            // Booleans, arrays and objects are shown as their JSON text.
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl CellValue {
    /// Interpret the value as a number.
    ///
    /// `Empty`, the empty string, unparseable text and NaN all yield `None`.
    /// Text follows web number coercion: surrounding whitespace is ignored,
    /// whitespace-only text is 0, `0x`/`0o`/`0b` integers and the spelling
    /// `Infinity` are accepted, `inf`/`nan` are not.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Empty => return None,
            CellValue::Number(v) => *v,
            CellValue::Text(s) if s.is_empty() => return None,
            CellValue::Text(s) => parse_number_text(s)?,
        };
        (!v.is_nan()).then_some(v)
    }

    /// Whether the value counts as numeric for column classification.
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

fn parse_number_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => 10,
    };
    if radix != 10 {
        let digits = &s[2..];
        if digits.is_empty() {
            return None;
        }
        // Fold into f64 so long literals lose precision instead of overflowing.
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        });
    }

    // `f64::from_str` also takes `inf`/`nan` spellings; only exponents may be letters.
    if s.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    s.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Record – one row, keys kept in source order
// ---------------------------------------------------------------------------

/// One row of the uploaded data: an ordered association list of
/// column name → value. Records in the same dataset may carry different keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Display form of a cell; absent keys render as an empty string.
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All records of one loaded file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Column names of the first record. Keys that only appear in later
    /// records are not part of the column set.
    pub fn columns(&self) -> Vec<String> {
        self.records
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_numeric_detection() {
        assert!(text("5").is_numeric());
        assert!(text(" 2.5 ").is_numeric());
        assert!(text("-1e3").is_numeric());
        assert!(CellValue::Number(0.0).is_numeric());

        assert!(!text("").is_numeric());
        assert!(!text("n/a").is_numeric());
        assert!(!text("NaN").is_numeric());
        assert!(!CellValue::Empty.is_numeric());
        assert!(!CellValue::Number(f64::NAN).is_numeric());
    }

    #[test]
    fn test_web_number_coercion() {
        assert_eq!(text("   ").as_f64(), Some(0.0));
        assert_eq!(text("\t").as_f64(), Some(0.0));

        assert_eq!(text("Infinity").as_f64(), Some(f64::INFINITY));
        assert_eq!(text(" -Infinity ").as_f64(), Some(f64::NEG_INFINITY));
        assert_eq!(text("inf").as_f64(), None);
        assert_eq!(text("infinity").as_f64(), None);
        assert_eq!(text("-inf").as_f64(), None);

        assert_eq!(text("0x10").as_f64(), Some(16.0));
        assert_eq!(text("0B101").as_f64(), Some(5.0));
        assert_eq!(text("0o17").as_f64(), Some(15.0));
        assert_eq!(text("0x").as_f64(), None);
        assert_eq!(text("0x1g").as_f64(), None);
        assert_eq!(text("-0x10").as_f64(), None);

        assert_eq!(text(".5").as_f64(), Some(0.5));
        assert_eq!(text("1E3").as_f64(), Some(1000.0));
        assert_eq!(text("+7").as_f64(), Some(7.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(3.5).to_string(), "3.5");
        assert_eq!(text("abc").to_string(), "abc");
    }

    #[test]
    fn test_from_json() {
        let v: JsonValue = serde_json::json!([null, 4, "x", true, {"a": 1}]);
        let cells: Vec<CellValue> = v.as_array().unwrap().iter().map(CellValue::from).collect();
        assert_eq!(cells[0], CellValue::Empty);
        assert_eq!(cells[1], CellValue::Number(4.0));
        assert_eq!(cells[2], text("x"));
        assert_eq!(cells[3], text("true"));
        assert_eq!(cells[4], text(r#"{"a":1}"#));
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut r = Record::new();
        r.insert("b", text("1"));
        r.insert("a", text("2"));
        r.insert("b", text("3"));

        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(r.get("b"), Some(&text("3")));
        assert_eq!(r.display("missing"), "");
    }

    #[test]
    fn test_columns_come_from_first_record() {
        let ds = Dataset::new(vec![
            [("a", text("1"))].into_iter().collect(),
            [("a", text("2")), ("extra", text("x"))].into_iter().collect(),
        ]);
        assert_eq!(ds.columns(), vec!["a".to_string()]);
        assert!(Dataset::default().columns().is_empty());
    }
}
