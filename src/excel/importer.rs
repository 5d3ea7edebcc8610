//! Excel importer implementation - change-record sheet (.xlsx) → ChangeRecords

use crate::error::{FormatterError, FormatterResult};
use crate::types::{CellValue, ChangeRecord, ChangeSheet, Field};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

/// Excel importer for change-record exports
pub struct ExcelImporter {
    path: std::path::PathBuf,
    sheet: Option<String>,
}

impl ExcelImporter {
    /// Create a new Excel importer reading the first worksheet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    /// Read a named worksheet instead of the first one
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Import the worksheet as change records
    pub fn import(&self) -> FormatterResult<ChangeSheet> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| FormatterError::Import(format!("Failed to open Excel file: {}", e)))?;

        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| FormatterError::Structure("workbook has no sheets".to_string()))?,
        };

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            FormatterError::Import(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        let sheet = Self::read_range(&sheet_name, &range)?;
        tracing::info!(
            sheet = %sheet.sheet_name,
            records = sheet.records.len(),
            skipped = sheet.skipped_rows.len(),
            "imported change records"
        );
        Ok(sheet)
    }

    /// Convert a cell range into records; the first non-empty row is the header
    pub fn read_range(sheet_name: &str, range: &Range<Data>) -> FormatterResult<ChangeSheet> {
        if range.is_empty() {
            return Err(FormatterError::Structure(format!(
                "sheet '{}' is empty",
                sheet_name
            )));
        }

        let (height, width) = range.get_size();
        // Absolute position of the range, so row numbers match what Excel shows
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        let header_row = (0..height)
            .find(|&row| (0..width).any(|col| !matches!(range.get((row, col)), None | Some(Data::Empty))))
            .ok_or_else(|| {
                FormatterError::Structure(format!("sheet '{}' has no header row", sheet_name))
            })?;

        // Column index → field
        let mut columns: Vec<(usize, Field)> = Vec::new();
        for col in 0..width {
            let header = match range.get((header_row, col)) {
                Some(Data::String(s)) => s.clone(),
                Some(Data::Empty) | None => continue,
                Some(other) => other.to_string(),
            };
            match Field::from_header(&header) {
                Some(field) if columns.iter().all(|(_, f)| *f != field) => {
                    columns.push((col, field))
                }
                Some(field) => {
                    tracing::debug!(header = %header, field = field.name(), "duplicate column ignored")
                }
                None => tracing::debug!(header = %header, "unrecognised column ignored"),
            }
        }

        if !Field::ESSENTIAL
            .iter()
            .any(|essential| columns.iter().any(|(_, f)| f == essential))
        {
            let expected: Vec<&str> = Field::ESSENTIAL.iter().map(Field::name).collect();
            return Err(FormatterError::Structure(format!(
                "sheet '{}' has none of the columns {}",
                sheet_name,
                expected.join(", ")
            )));
        }

        let mut sheet = ChangeSheet {
            sheet_name: sheet_name.to_string(),
            fields: columns.iter().map(|(_, f)| *f).collect(),
            ..Default::default()
        };

        for row in (header_row + 1)..height {
            let row_number = first_row + row + 1;
            let mut record = ChangeRecord::new(row_number);
            for (col, field) in &columns {
                let value = range
                    .get((row, *col))
                    .map(convert_cell)
                    .unwrap_or(CellValue::Empty);
                record.set(*field, value);
            }

            if record.is_blank() {
                tracing::warn!(row = row_number, "skipping row with no change data");
                sheet.skipped_rows.push(row_number);
                continue;
            }
            sheet.records.push(record);
        }

        Ok(sheet)
    }
}

/// Map a calamine cell onto the formatter's cell model
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => {
            tracing::debug!(error = ?e, "cell error treated as blank");
            CellValue::Empty
        }
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| s.parse::<NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}
