use std::collections::HashMap;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Row and series caps applied when shaping a dataset for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeLimits {
    /// Rows shown in the preview table.
    pub preview_rows: usize,
    /// Rows fed to the bar and line charts.
    pub chart_rows: usize,
    /// Numeric columns plotted as separate series.
    pub max_series: usize,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            preview_rows: 10,
            chart_rows: 20,
            max_series: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// A record prepared for the bar/line charts, tagged with its 1-based
/// position in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub index: usize,
    pub record: Record,
}

impl ChartRow {
    /// Value of `key`, where `"index"` resolves to the sequence number unless
    /// the record has its own `index` column.
    pub fn label(&self, key: &str) -> String {
        match self.record.get(key) {
            Some(v) => v.to_string(),
            None if key == "index" => self.index.to_string(),
            None => String::new(),
        }
    }

    /// Numeric value of `key`, if it parses.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.record.get(key).and_then(CellValue::as_f64)
    }
}

/// One slice of the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub category: String,
    pub total: f64,
}

/// Everything the table and chart renderers need, computed once per load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedView {
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub preview: Dataset,
    pub chart_rows: Vec<ChartRow>,
    pub pie: Vec<PieSlice>,
    /// Numeric columns drawn as bar/line series.
    pub series: Vec<String>,
    /// Column used for x-axis labels: first categorical column, else `index`.
    pub x_key: String,
}

impl ShapedView {
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }

    /// Whether the preview hides some rows.
    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.preview.len()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Split the first record's columns into `(numeric, categorical)`.
///
/// A column is numeric as soon as *any* record holds a non-empty, parseable
/// number in it. Both lists keep the original column order.
pub fn classify_columns(dataset: &Dataset) -> (Vec<String>, Vec<String>) {
    dataset.columns().into_iter().partition(|col| {
        dataset
            .records
            .iter()
            .any(|r| r.get(col).is_some_and(CellValue::is_numeric))
    })
}

/// The first `limit` records, in order.
pub fn preview_rows(dataset: &Dataset, limit: usize) -> Dataset {
    Dataset::new(dataset.records.iter().take(limit).cloned().collect())
}

/// The first `limit` records copied into [`ChartRow`]s with a 1-based index.
pub fn chart_rows(dataset: &Dataset, limit: usize) -> Vec<ChartRow> {
    dataset
        .records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, record)| ChartRow {
            index: i + 1,
            record: record.clone(),
        })
        .collect()
}

/// Sum the first numeric column grouped by the first categorical column.
///
/// Categories keep first-seen order. Cells that do not parse as numbers
/// count as 0. Returns an empty list unless both column lists are non-empty.
pub fn aggregate_for_pie(
    dataset: &Dataset,
    categorical: &[String],
    numeric: &[String],
) -> Vec<PieSlice> {
    let (Some(cat_col), Some(val_col)) = (categorical.first(), numeric.first()) else {
        return Vec::new();
    };

    let mut slices: Vec<PieSlice> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in &dataset.records {
        let category = record.display(cat_col);
        let value = record.get(val_col).and_then(CellValue::as_f64).unwrap_or(0.0);

        match positions.get(&category) {
            Some(&pos) => slices[pos].total += value,
            None => {
                positions.insert(category.clone(), slices.len());
                slices.push(PieSlice { category, total: value });
            }
        }
    }
    slices
}

/// Run every shaping step over `dataset`.
pub fn shape(dataset: &Dataset, limits: &ShapeLimits) -> ShapedView {
    let (numeric_columns, categorical_columns) = classify_columns(dataset);
    let pie = aggregate_for_pie(dataset, &categorical_columns, &numeric_columns);
    let series = numeric_columns
        .iter()
        .take(limits.max_series)
        .cloned()
        .collect();
    let x_key = categorical_columns
        .first()
        .cloned()
        .unwrap_or_else(|| "index".to_string());

    ShapedView {
        total_rows: dataset.len(),
        columns: dataset.columns(),
        preview: preview_rows(dataset, limits.preview_rows),
        chart_rows: chart_rows(dataset, limits.chart_rows),
        numeric_columns,
        categorical_columns,
        pie,
        series,
        x_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (*k, CellValue::Text(v.to_string())))
            .collect()
    }

    fn numbered(n: usize) -> Dataset {
        Dataset::new(
            (0..n)
                .map(|i| record(&[("id", &i.to_string()), ("name", "row")]))
                .collect(),
        )
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_numeric_cell_makes_column_numeric() {
        let ds = Dataset::new(vec![record(&[("a", "x")]), record(&[("a", "5")])]);
        let (numeric, categorical) = classify_columns(&ds);
        assert_eq!(numeric, names(&["a"]));
        assert!(categorical.is_empty());
    }

    #[test]
    fn test_classification_partitions_first_record_columns() {
        let ds = Dataset::new(vec![
            record(&[("city", "Oslo"), ("pop", "700"), ("note", ""), ("year", "2020")]),
            record(&[("city", "Rome"), ("pop", "n/a"), ("note", ""), ("year", "x")]),
            record(&[("late", "1")]),
        ]);
        let (numeric, categorical) = classify_columns(&ds);
        assert_eq!(numeric, names(&["pop", "year"]));
        assert_eq!(categorical, names(&["city", "note"]));

        let mut all: Vec<String> = numeric.into_iter().chain(categorical).collect();
        all.sort();
        let mut cols = ds.columns();
        cols.sort();
        assert_eq!(all, cols);
    }

    #[test]
    fn test_classification_follows_web_number_coercion() {
        let blank = Dataset::new(vec![record(&[("a", "x")]), record(&[("a", " ")])]);
        assert_eq!(classify_columns(&blank), (names(&["a"]), vec![]));

        let inf = Dataset::new(vec![record(&[("a", "x")]), record(&[("a", "inf")])]);
        assert_eq!(classify_columns(&inf), (vec![], names(&["a"])));

        let hex = Dataset::new(vec![record(&[("a", "0x10")])]);
        assert_eq!(classify_columns(&hex), (names(&["a"]), vec![]));
    }

    #[test]
    fn test_empty_strings_are_not_numeric() {
        let ds = Dataset::new(vec![record(&[("a", "")]), record(&[("a", "")])]);
        let (numeric, categorical) = classify_columns(&ds);
        assert!(numeric.is_empty());
        assert_eq!(categorical, names(&["a"]));
    }

    #[test]
    fn test_zero_column_first_record() {
        let ds = Dataset::new(vec![Record::new(), record(&[("a", "1")])]);
        let (numeric, categorical) = classify_columns(&ds);
        assert!(numeric.is_empty());
        assert!(categorical.is_empty());
        assert!(shape(&ds, &ShapeLimits::default()).pie.is_empty());
    }

    #[test]
    fn test_preview_rows_truncates() {
        let ds = numbered(25);
        let preview = preview_rows(&ds, 10);
        assert_eq!(preview.len(), 10);
        assert_eq!(preview.records[..], ds.records[..10]);

        assert_eq!(preview_rows(&numbered(4), 10).len(), 4);
    }

    #[test]
    fn test_chart_rows_are_indexed_copies() {
        let ds = numbered(25);
        let rows = chart_rows(&ds, 20);
        assert_eq!(rows.len(), 20);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.index, i + 1);
            assert_eq!(row.record, ds.records[i]);
            assert!(row.record.get("index").is_none());
            assert_eq!(row.label("index"), (i + 1).to_string());
        }
        assert_eq!(chart_rows(&numbered(3), 20).len(), 3);
    }

    #[test]
    fn test_chart_row_prefers_own_index_column() {
        let ds = Dataset::new(vec![record(&[("index", "z")])]);
        let rows = chart_rows(&ds, 20);
        assert_eq!(rows[0].label("index"), "z");
        assert_eq!(rows[0].index, 1);
    }

    #[test]
    fn test_pie_aggregation_groups_in_first_seen_order() {
        let ds = Dataset::new(vec![
            record(&[("cat", "A"), ("val", "3")]),
            record(&[("cat", "B"), ("val", "2")]),
            record(&[("cat", "A"), ("val", "4")]),
        ]);
        let pie = aggregate_for_pie(&ds, &names(&["cat"]), &names(&["val"]));
        assert_eq!(
            pie,
            vec![
                PieSlice { category: "A".into(), total: 7.0 },
                PieSlice { category: "B".into(), total: 2.0 },
            ]
        );
    }

    #[test]
    fn test_pie_malformed_value_counts_as_zero() {
        let ds = Dataset::new(vec![
            record(&[("cat", "A"), ("val", "n/a")]),
            record(&[("cat", "A"), ("val", "1.5")]),
            record(&[("cat", "B"), ("val", "n/a")]),
            record(&[("cat", "C")]),
        ]);
        let pie = aggregate_for_pie(&ds, &names(&["cat"]), &names(&["val"]));
        assert_eq!(pie.len(), 3);
        assert_eq!(pie[0].total, 1.5);
        assert_eq!(pie[1].total, 0.0);
        assert_eq!(pie[2].total, 0.0);
    }

    #[test]
    fn test_pie_requires_both_column_kinds() {
        let ds = Dataset::new(vec![record(&[("cat", "A"), ("val", "1")])]);
        assert!(aggregate_for_pie(&ds, &[], &names(&["val"])).is_empty());
        assert!(aggregate_for_pie(&ds, &names(&["cat"]), &[]).is_empty());
    }

    #[test]
    fn test_empty_dataset_shapes_to_empty_view() {
        let view = shape(&Dataset::default(), &ShapeLimits::default());
        assert!(view.is_empty());
        assert!(view.columns.is_empty());
        assert!(view.numeric_columns.is_empty());
        assert!(view.categorical_columns.is_empty());
        assert!(view.preview.is_empty());
        assert!(view.chart_rows.is_empty());
        assert!(view.pie.is_empty());
        assert_eq!(view.x_key, "index");
    }

    #[test]
    fn test_shape_picks_series_and_x_key() {
        let ds = Dataset::new(vec![record(&[
            ("a", "1"),
            ("label", "x"),
            ("b", "2"),
            ("c", "3"),
            ("d", "4"),
        ])]);
        let view = shape(&ds, &ShapeLimits::default());
        assert_eq!(view.series, names(&["a", "b", "c"]));
        assert_eq!(view.x_key, "label");
        assert!(!view.is_truncated());
    }
}
