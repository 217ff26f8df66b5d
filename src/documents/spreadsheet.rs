//! Spreadsheet parsing
//!
//! Reads the first worksheet of an uploaded workbook (xlsx, xlsm, xlsb, xls
//! or ods). The first row names the columns; every following non-blank row
//! becomes one record. The whole sheet is returned, so this is meant for
//! small uploads only.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

use super::DocumentError;

/// Column names plus one record per data row, keyed by column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub data: Vec<Map<String, Value>>,
}

impl Table {
    /// Build a table from raw rows, the first of which is the header
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a [Data]>,
    {
        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            return Self::default();
        };

        let columns = column_names(header);
        let data = rows
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| {
                        let value = row.get(index).map(cell_value).unwrap_or(Value::Null);
                        (column.clone(), value)
                    })
                    .collect()
            })
            .collect();

        Self { columns, data }
    }
}

/// Header cells as column names: blanks become `Unnamed: <index>` and repeated
/// names get the first free `.<n>` suffix so every record key is unique
fn column_names(header: &[Data]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {}", index),
                other => other.to_string().trim().to_string(),
            };

            let mut name = base.clone();
            if taken.contains(&name) {
                let suffix = suffixes.entry(base.clone()).or_insert(0);
                while taken.contains(&name) {
                    *suffix += 1;
                    name = format!("{}.{}", base, suffix);
                }
            }

            taken.insert(name.clone());
            name
        })
        .collect()
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

pub fn parse_workbook(bytes: &[u8]) -> Result<Table, DocumentError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DocumentError::NoWorksheet)??;

    let table = Table::from_rows(range.rows());
    debug!(
        columns = table.columns.len(),
        rows = table.data.len(),
        "Parsed spreadsheet"
    );
    Ok(table)
}
