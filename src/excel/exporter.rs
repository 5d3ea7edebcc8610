//! Excel exporter implementation

use crate::core::layout::{header_cells, record_cells, RichCell, TextStyle};
use crate::error::{FormatterError, FormatterResult};
use crate::types::FormattedRecord;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;

pub const OUTPUT_SHEET_NAME: &str = "Formatted Output";

/// Widest a column is allowed to grow, in characters
const MAX_COLUMN_WIDTH: usize = 80;

/// Cell formats, one per `TextStyle`
struct Styles {
    bold: Format,
    normal: Format,
    /// Wrapped, top-aligned cell; run formats only cover the text
    cell: Format,
    bold_cell: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            bold: Format::new().set_bold(),
            normal: Format::new(),
            cell: Format::new().set_text_wrap().set_align(FormatAlign::Top),
            bold_cell: Format::new()
                .set_bold()
                .set_text_wrap()
                .set_align(FormatAlign::Top),
        }
    }

    fn for_style(&self, style: TextStyle) -> &Format {
        match style {
            TextStyle::Bold => &self.bold,
            TextStyle::Normal => &self.normal,
        }
    }

    /// Whole-cell format for single-run cells
    fn cell_for_style(&self, style: TextStyle) -> &Format {
        match style {
            TextStyle::Bold => &self.bold_cell,
            TextStyle::Normal => &self.cell,
        }
    }
}

/// Excel exporter for formatted change records
pub struct ExcelExporter {
    records: Vec<FormattedRecord>,
}

impl ExcelExporter {
    /// Create a new Excel exporter
    pub fn new(records: Vec<FormattedRecord>) -> Self {
        Self { records }
    }

    /// Export the records to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> FormatterResult<()> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save(output_path)
            .map_err(|e| FormatterError::Export(format!("Failed to save Excel file: {}", e)))?;
        tracing::info!(path = %output_path.display(), records = self.records.len(), "wrote workbook");
        Ok(())
    }

    /// Serialize the workbook in memory (for callers that stream the download)
    pub fn to_buffer(&self) -> FormatterResult<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save_to_buffer()
            .map_err(|e| FormatterError::Export(format!("Failed to serialize workbook: {}", e)))
    }

    fn build_workbook(&self) -> FormatterResult<Workbook> {
        let mut workbook = Workbook::new();
        let styles = Styles::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(OUTPUT_SHEET_NAME)
            .map_err(|e| FormatterError::Export(format!("Failed to set worksheet name: {}", e)))?;

        let mut rows: Vec<Vec<RichCell>> = vec![header_cells()];
        rows.extend(self.records.iter().map(record_cells));

        let mut widths = vec![0usize; rows[0].len()];
        for (row_idx, cells) in rows.iter().enumerate() {
            for (col_idx, cell) in cells.iter().enumerate() {
                Self::write_cell(worksheet, &styles, row_idx as u32, col_idx as u16, cell)?;
                widths[col_idx] = widths[col_idx].max(cell.widest_line());
            }
        }

        // Longest line + 2, capped
        for (col_idx, width) in widths.iter().enumerate() {
            let width = (*width + 2).min(MAX_COLUMN_WIDTH);
            worksheet
                .set_column_width(col_idx as u16, width as f64)
                .map_err(|e| FormatterError::Export(format!("Failed to set column width: {}", e)))?;
        }

        Ok(workbook)
    }

    fn write_cell(
        worksheet: &mut Worksheet,
        styles: &Styles,
        row: u32,
        col: u16,
        cell: &RichCell,
    ) -> FormatterResult<()> {
        let result = match cell.runs.as_slice() {
            [] => return Ok(()),
            // Rich strings need at least two runs
            [run] => worksheet
                .write_string_with_format(row, col, &run.text, styles.cell_for_style(run.style))
                .map(|_| ()),
            runs => {
                let segments: Vec<(&Format, &str)> = runs
                    .iter()
                    .map(|run| (styles.for_style(run.style), run.text.as_str()))
                    .collect();
                worksheet
                    .write_rich_string_with_format(row, col, &segments, &styles.cell)
                    .map(|_| ())
            }
        };
        result.map_err(|e| {
            FormatterError::Export(format!("Failed to write cell ({}, {}): {}", row, col, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_buffer_produces_zip() {
        let record = FormattedRecord {
            row: 2,
            date_line: "9th April 2025".to_string(),
            title_line: "Patch".to_string(),
            trading_scope: "No".to_string(),
            ..Default::default()
        };
        let bytes = ExcelExporter::new(vec![record]).to_buffer().unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_to_buffer_with_no_records() {
        let bytes = ExcelExporter::new(vec![]).to_buffer().unwrap();
        assert!(!bytes.is_empty());
    }
}
