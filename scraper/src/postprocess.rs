use crate::table::HeaderMap;
use serde_json::{Map, Value};

/// One table row keyed by expected column name. Keys keep the expected
/// column order when written out.
pub type KeyedRow = Map<String, Value>;

/// Turn rows ordered like the header map into rows keyed by column name.
pub fn key_rows(rows: Vec<Vec<String>>, header_map: &HeaderMap) -> Vec<KeyedRow> {
    rows.into_iter()
        .map(|row| {
            header_map
                .columns()
                .map(str::to_string)
                .zip(row.into_iter().map(Value::String))
                .collect::<KeyedRow>()
        })
        .collect()
}

/// Remove the trailing percent sign from the given columns, leaving a bare
/// number. Columns not listed, and rows without the column, are left alone.
pub fn strip_percentages<S: AsRef<str>>(rows: Vec<KeyedRow>, columns: &[S]) -> Vec<KeyedRow> {
    rows.into_iter()
        .map(|mut row| {
            for column in columns {
                if let Some(Value::String(value)) = row.get_mut(column.as_ref()) {
                    // "92.3 %" and "92.3%" both become "92.3"
                    let trimmed = value.trim_end();
                    if let Some(number) = trimmed.strip_suffix('%') {
                        *value = number.trim_end().to_string();
                    }
                }
            }
            row
        })
        .collect()
}
