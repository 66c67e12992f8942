use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::core::keys::{COLUMNS, DATA, INDEX};
use crate::error::{CxError, CxResult};

/// Field delimiters accepted for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }

    pub fn from_char(value: char) -> CxResult<Self> {
        match value {
            ',' => Ok(Self::Comma),
            '\t' => Ok(Self::Tab),
            other => Err(CxError::invalid_type(format!(
                "delimiter must be a comma or a tab, found {other:?}"
            ))),
        }
    }
}

/// Labelled, rectangular, row-major table.
///
/// The serialized form is the raw dict view `{index, columns, data}`; rows are
/// validated against the label vectors on construction and deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "FrameParts")]
pub struct DataFrame {
    index: Vec<Value>,
    columns: Vec<Value>,
    data: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct FrameParts {
    index: Vec<Value>,
    columns: Vec<Value>,
    data: Vec<Vec<Value>>,
}

impl TryFrom<FrameParts> for DataFrame {
    type Error = CxError;

    fn try_from(parts: FrameParts) -> CxResult<Self> {
        Self::new(parts.index, parts.columns, parts.data)
    }
}

impl DataFrame {
    pub fn new(index: Vec<Value>, columns: Vec<Value>, data: Vec<Vec<Value>>) -> CxResult<Self> {
        if index.len() != data.len() {
            return Err(CxError::invalid_type(format!(
                "frame index has {} labels but {} rows",
                index.len(),
                data.len()
            )));
        }
        if let Some((row, cells)) = data
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(CxError::invalid_type(format!(
                "frame row {row} has {} cells but {} columns",
                cells.len(),
                columns.len()
            )));
        }
        Ok(Self {
            index,
            columns,
            data,
        })
    }

    /// Builds a frame with a positional `0..n` index.
    pub fn from_rows(columns: Vec<Value>, data: Vec<Vec<Value>>) -> CxResult<Self> {
        let index = (0..data.len()).map(|i| Value::from(i as u64)).collect();
        Self::new(index, columns, data)
    }

    /// Builds a frame from named columns of equal length.
    pub fn from_columns(columns: IndexMap<String, Vec<Value>>) -> CxResult<Self> {
        let row_count = columns.values().next().map_or(0, Vec::len);
        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != row_count) {
            return Err(CxError::invalid_type(format!(
                "column {name:?} has {} values, expected {row_count}",
                values.len()
            )));
        }
        let labels = columns.keys().cloned().map(Value::String).collect();
        let data = (0..row_count)
            .map(|row| columns.values().map(|values| values[row].clone()).collect())
            .collect();
        Self::from_rows(labels, data)
    }

    /// Parses delimited text. The first non-empty line is the header.
    ///
    /// With `index_col` the first field of every line becomes the row label;
    /// otherwise rows receive a positional index. Numeric, boolean and empty
    /// fields are converted to JSON numbers, booleans and null.
    pub fn from_csv(text: &str, delimiter: Delimiter, index_col: bool) -> CxResult<Self> {
        // Blank lines are skipped by the reader itself; leading and trailing
        // delimiters are empty cells and must survive.
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut columns: Vec<Value> = reader
            .headers()?
            .iter()
            .map(|h| Value::String(h.to_owned()))
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(parse_field).collect::<Vec<_>>());
        }
        trace!(rows = rows.len(), cols = columns.len(), index_col, "parsed delimited text");

        if !index_col {
            return Self::from_rows(columns, rows);
        }

        if columns.is_empty() {
            return Err(CxError::invalid_type(
                "index_col requires at least one column",
            ));
        }
        columns.remove(0);
        let mut index = Vec::with_capacity(rows.len());
        for row in &mut rows {
            index.push(row.remove(0));
        }
        Self::new(index, columns, rows)
    }

    /// Writes the frame as delimited text with the index as an unnamed first column.
    pub fn to_csv(&self, delimiter: Delimiter) -> CxResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter.as_byte())
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(Vec::new());

        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(field_text));
        writer.write_record(&header)?;

        for (label, row) in self.index.iter().zip(&self.data) {
            let mut record = vec![field_text(label)];
            record.extend(row.iter().map(field_text));
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CxError::invalid_type(format!("failed to flush csv writer: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| CxError::invalid_type(format!("csv output is not utf-8: {e}")))
    }

    #[must_use]
    pub fn index(&self) -> &[Value] {
        &self.index
    }

    #[must_use]
    pub fn columns(&self) -> &[Value] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.data
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// A frame with no rows or no columns carries no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.columns.is_empty()
    }

    #[must_use]
    pub fn column(&self, position: usize) -> Option<Vec<&Value>> {
        (position < self.columns.len())
            .then(|| self.data.iter().map(|row| &row[position]).collect())
    }

    #[must_use]
    pub fn row(&self, position: usize) -> Option<&[Value]> {
        self.data.get(position).map(Vec::as_slice)
    }

    /// Structure-preserving dict view: `{index, columns, data}`.
    #[must_use]
    pub fn raw_dict_form(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(INDEX.to_owned(), Value::Array(self.index.clone()));
        map.insert(COLUMNS.to_owned(), Value::Array(self.columns.clone()));
        map.insert(
            DATA.to_owned(),
            Value::Array(self.data.iter().cloned().map(Value::Array).collect()),
        );
        map
    }
}

fn parse_field(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = field.parse::<i64>() {
        return Value::from(int);
    }
    if let Some(number) = field.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    match field {
        "true" | "True" | "TRUE" => Value::Bool(true),
        "false" | "False" | "FALSE" => Value::Bool(false),
        _ => Value::String(field.to_owned()),
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{parse_field, DataFrame, Delimiter};

    #[test]
    fn parse_field_recognizes_numbers_bools_and_blanks() {
        assert_eq!(parse_field("12"), json!(12));
        assert_eq!(parse_field("1.5"), json!(1.5));
        assert_eq!(parse_field("True"), json!(true));
        assert_eq!(parse_field(""), json!(null));
        assert_eq!(parse_field("Gene1"), json!("Gene1"));
        assert_eq!(parse_field("NaN"), json!("NaN"));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = DataFrame::from_rows(vec![json!("a"), json!("b")], vec![vec![json!(1)]]);
        assert!(err.is_err());
    }

    #[test]
    fn csv_round_trip_keeps_labels() {
        let frame = DataFrame::from_csv("id,a,b\nr1,1,2\nr2,3,4", Delimiter::Comma, true)
            .expect("parse");
        let text = frame.to_csv(Delimiter::Comma).expect("write");
        let again = DataFrame::from_csv(&text, Delimiter::Comma, true).expect("reparse");
        assert_eq!(again.index(), frame.index());
        assert_eq!(again.columns(), frame.columns());
        assert_eq!(again.rows(), frame.rows());
    }
}
