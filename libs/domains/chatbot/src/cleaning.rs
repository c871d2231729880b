//! Value cleaning and row text rendering.
//!
//! NULL and blank cells are replaced by a default chosen from the column's
//! type name. The rules match on lower-cased substrings and are checked in
//! order: numeric, then temporal, then boolean, so `interval` counts as
//! numeric and `timestamptz` as temporal.

use std::collections::BTreeMap;

use crate::models::{ColumnMeta, RowRecord};

/// Placeholder for missing text values. Never rendered into row text.
pub const TEXT_SENTINEL: &str = "N/A";

/// Placeholder for missing date and time values
pub const DATE_SENTINEL: &str = "1900-01-01";

/// Separator between `column: value` fragments
pub const FIELD_DELIMITER: &str = " | ";

const NUMERIC_MARKERS: &[&str] = &[
    "int", "decimal", "numeric", "float", "real", "money", "double", "serial",
];
const TEMPORAL_MARKERS: &[&str] = &["date", "time"];
const BOOLEAN_MARKERS: &[&str] = &["bit", "bool"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Temporal,
    Boolean,
    Text,
}

impl ColumnKind {
    pub fn from_type_name(type_name: &str) -> Self {
        let lowered = type_name.to_lowercase();
        let has_any = |markers: &[&str]| markers.iter().any(|m| lowered.contains(m));

        if has_any(NUMERIC_MARKERS) {
            ColumnKind::Numeric
        } else if has_any(TEMPORAL_MARKERS) {
            ColumnKind::Temporal
        } else if has_any(BOOLEAN_MARKERS) {
            ColumnKind::Boolean
        } else {
            ColumnKind::Text
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            ColumnKind::Numeric | ColumnKind::Boolean => "0",
            ColumnKind::Temporal => DATE_SENTINEL,
            ColumnKind::Text => TEXT_SENTINEL,
        }
    }
}

/// Trim, collapse internal whitespace, and substitute the type default for
/// NULL or blank input. Applying it to its own output is a no-op.
pub fn clean_value(value: Option<&str>, type_name: &str) -> String {
    match value {
        Some(raw) if !raw.trim().is_empty() => raw.split_whitespace().collect::<Vec<_>>().join(" "),
        _ => ColumnKind::from_type_name(type_name).default_value().to_string(),
    }
}

/// Clean every cell of one row
pub fn clean_row(columns: &[ColumnMeta], cells: &[Option<String>]) -> RowRecord {
    let values: BTreeMap<String, String> = columns
        .iter()
        .zip(cells.iter())
        .map(|(column, cell)| (column.name.clone(), clean_value(cell.as_deref(), &column.data_type)))
        .collect();

    RowRecord {
        columns: columns.to_vec(),
        values,
    }
}

/// `col: value` fragments in column order, skipping empty values and the text sentinel
pub fn row_text(record: &RowRecord) -> String {
    record
        .columns
        .iter()
        .filter_map(|column| {
            let value = record.values.get(&column.name)?;
            if value.is_empty() || value == TEXT_SENTINEL {
                None
            } else {
                Some(format!("{}: {}", column.name, value))
            }
        })
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_postgres_type_names() {
        assert_eq!(ColumnKind::from_type_name("INT4"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_type_name("bigint"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_type_name("double precision"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_type_name("NUMERIC"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_type_name("bigserial"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_type_name("TIMESTAMPTZ"), ColumnKind::Temporal);
        assert_eq!(ColumnKind::from_type_name("date"), ColumnKind::Temporal);
        assert_eq!(ColumnKind::from_type_name("BOOL"), ColumnKind::Boolean);
        assert_eq!(ColumnKind::from_type_name("bit"), ColumnKind::Boolean);
        assert_eq!(ColumnKind::from_type_name("character varying"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_type_name("TEXT"), ColumnKind::Text);
    }

    #[test]
    fn test_numeric_checked_before_temporal() {
        // "interval" contains "int"
        assert_eq!(ColumnKind::from_type_name("INTERVAL"), ColumnKind::Numeric);
        assert_eq!(clean_value(None, "interval"), "0");
    }

    #[test]
    fn test_defaults_for_null_and_blank() {
        assert_eq!(clean_value(None, "INT4"), "0");
        assert_eq!(clean_value(Some("   "), "TIMESTAMP"), "1900-01-01");
        assert_eq!(clean_value(Some(""), "BOOL"), "0");
        assert_eq!(clean_value(None, "TEXT"), "N/A");
    }

    #[test]
    fn test_whitespace_is_trimmed_and_collapsed() {
        assert_eq!(clean_value(Some("  Alice \t  Smith\n"), "TEXT"), "Alice Smith");
        assert_eq!(clean_value(Some("42"), "INT4"), "42");
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let samples = [
            (None, "TEXT"),
            (None, "INT8"),
            (None, "DATE"),
            (Some("  a   b  "), "TEXT"),
            (Some("\n"), "BOOL"),
            (Some("N/A"), "VARCHAR"),
        ];

        for (value, type_name) in samples {
            let once = clean_value(value, type_name);
            let twice = clean_value(Some(&once), type_name);
            assert_eq!(once, twice, "value {:?} of type {}", value, type_name);
        }
    }

    #[test]
    fn test_row_text_skips_sentinel() {
        let columns = vec![ColumnMeta::new("id", "INT4"), ColumnMeta::new("name", "TEXT")];
        let record = clean_row(&columns, &[Some("2".into()), None]);

        assert_eq!(record.values["name"], "N/A");
        assert_eq!(row_text(&record), "id: 2");
    }

    #[test]
    fn test_row_text_keeps_column_order() {
        let columns = vec![
            ColumnMeta::new("zeta", "TEXT"),
            ColumnMeta::new("alpha", "TEXT"),
        ];
        let record = clean_row(&columns, &[Some("z".into()), Some("a".into())]);

        assert_eq!(row_text(&record), "zeta: z | alpha: a");
    }

    #[test]
    fn test_all_null_text_row_renders_empty() {
        let columns = vec![ColumnMeta::new("a", "TEXT"), ColumnMeta::new("b", "VARCHAR")];
        let record = clean_row(&columns, &[None, Some("  ".into())]);

        assert_eq!(row_text(&record), "");
        assert_eq!(record.values.len(), 2);
    }
}
