// Transaction table entity
// A batch of rows with dynamic columns, as uploaded by a caller or read from the reference dataset

use std::io::Read;

use serde_json::Value;

use crate::error::ScoringError;

pub const AMOUNT_COLUMN: &str = "Amount";
pub const TIME_COLUMN: &str = "Time";
pub const CLASS_COLUMN: &str = "Class";
pub const ID_COLUMN: &str = "transaction_id";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Parses a raw text cell. Blank and `NaN` become missing, non-finite numbers stay text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_nan() => Cell::Missing,
            Ok(value) if value.is_finite() => Cell::Number(value),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Missing,
            Value::Bool(flag) => Cell::Number(if *flag { 1.0 } else { 0.0 }),
            Value::Number(number) => number.as_f64().map(Cell::Number).unwrap_or(Cell::Missing),
            Value::String(text) => Cell::parse(text),
            other => Cell::Text(other.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Renders the cell as an identifier; whole numbers drop their fractional part.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                Some(format!("{}", *value as i64))
            }
            Cell::Number(value) => Some(value.to_string()),
            Cell::Text(text) => Some(text.clone()),
            Cell::Missing => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl TransactionTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with missing cells and dropping surplus cells.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        &self.rows[row][column]
    }

    pub fn truncate(&mut self, max_rows: usize) {
        self.rows.truncate(max_rows);
    }

    /// Reads a column as numbers. Missing cells stay `None`; text cells are rejected.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, ScoringError> {
        let index = self
            .column_index(name)
            .ok_or_else(|| ScoringError::MissingColumn(name.to_string()))?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| match &cells[index] {
                Cell::Number(value) => Ok(Some(*value)),
                Cell::Missing => Ok(None),
                Cell::Text(value) => Err(ScoringError::NonNumeric {
                    column: name.to_string(),
                    row,
                    value: value.clone(),
                }),
            })
            .collect()
    }

    /// Builds a new table from the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&index| self.rows[index].clone()).collect(),
        }
    }

    /// Replaces a column, or appends it when absent. Extra values are ignored.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Missing);
                }
                self.columns.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ScoringError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|err| ScoringError::InvalidTable(err.to_string()))?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        let mut table = TransactionTable::new(headers);
        for record in csv_reader.records() {
            let record = record.map_err(|err| ScoringError::InvalidTable(err.to_string()))?;
            table.push_row(record.iter().map(Cell::parse).collect());
        }
        Ok(table)
    }

    /// Accepts an array of row objects or an object of column arrays.
    pub fn from_json(value: &Value) -> Result<Self, ScoringError> {
        match value {
            Value::Array(rows) => Self::from_json_rows(rows),
            Value::Object(columns) => {
                let names = columns.keys().cloned().collect::<Vec<_>>();
                let mut series = Vec::with_capacity(columns.len());
                for (name, values) in columns {
                    match values {
                        Value::Array(items) => series.push(items),
                        _ => {
                            return Err(ScoringError::InvalidTable(format!(
                                "column '{}' must be an array",
                                name
                            )))
                        }
                    }
                }
                let row_count = series.iter().map(|items| items.len()).max().unwrap_or(0);
                let mut table = TransactionTable::new(names);
                for row in 0..row_count {
                    table.push_row(
                        series
                            .iter()
                            .map(|items| items.get(row).map(Cell::from_json).unwrap_or(Cell::Missing))
                            .collect(),
                    );
                }
                Ok(table)
            }
            _ => Err(ScoringError::InvalidTable(
                "transactions must be an array of rows or an object of columns".to_string(),
            )),
        }
    }

    fn from_json_rows(rows: &[Value]) -> Result<Self, ScoringError> {
        let mut columns: Vec<String> = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            let object = row.as_object().ok_or_else(|| {
                ScoringError::InvalidTable(format!("row {} is not an object", index))
            })?;
            for key in object.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
        }
        let mut table = TransactionTable::new(columns);
        for row in rows {
            let cells: Vec<Cell> = table
                .columns
                .iter()
                .map(|column| row.get(column).map(Cell::from_json).unwrap_or(Cell::Missing))
                .collect();
            table.push_row(cells);
        }
        Ok(table)
    }
}
