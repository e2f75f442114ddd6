//! CSV dataset parser
//!
//! Resolves every [`Field`] against the header row once, then parses rows
//! into typed records. A missing column or a non-numeric cell fails the
//! whole load: there is no partial dataset.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::models::{Dataset, Record};
use crate::schema::Field;

/// Parser for the survey CSV
#[derive(Debug, Clone)]
pub struct DatasetParser {
    delimiter: u8,
}

impl Default for DatasetParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl DatasetParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a dataset from a CSV file
    pub fn parse_file(&self, path: &Path) -> Result<Dataset, CoreError> {
        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let dataset = self.parse_reader(file)?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            "Loaded survey dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV source (header row required)
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Dataset, CoreError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(csv_error)?.clone();
        let columns = resolve_columns(&headers)?;
        debug!(
            columns = headers.len(),
            "Header row validated against schema"
        );

        let mut records = Vec::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row = row.map_err(csv_error)?;
            records.push(parse_row(&row, &columns, index + 1)?);
        }

        debug!(rows = records.len(), "Parsed data rows");
        Ok(Dataset::from_records(records))
    }
}

/// Column index of every schema field
///
/// Fails on the first missing field in schema order.
fn resolve_columns(headers: &csv::StringRecord) -> Result<HashMap<Field, usize>, CoreError> {
    let mut columns = HashMap::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let index = headers
            .iter()
            .position(|h| h == field.column_name())
            .ok_or_else(|| CoreError::MissingColumn {
                column: field.column_name().to_string(),
            })?;
        columns.insert(field, index);
    }
    Ok(columns)
}

fn parse_row(
    row: &csv::StringRecord,
    columns: &HashMap<Field, usize>,
    row_number: usize,
) -> Result<Record, CoreError> {
    let mut record = Record::default();

    for field in Field::ALL {
        let raw = row.get(columns[&field]).unwrap_or_default();

        if let Some(slot) = record.numeric_mut(field) {
            *slot = parse_number(raw).ok_or_else(|| CoreError::MalformedValue {
                row: row_number,
                column: field.column_name().to_string(),
                value: raw.to_string(),
            })?;
        } else if let Some(slot) = record.category_mut(field) {
            *slot = raw.to_string();
        }
    }

    Ok(record)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn csv_error(source: csv::Error) -> CoreError {
    let line = source.position().map(|p| p.line()).unwrap_or(0);
    CoreError::CsvParse {
        line,
        message: source.to_string(),
        source,
    }
}
