//! Excel import/export for change records
//!
//! - Import: change-record sheet (.xlsx) → `ChangeSheet`
//! - Export: `FormattedRecord`s → formatted summary sheet (.xlsx)

mod exporter;
mod importer;

pub use exporter::{ExcelExporter, OUTPUT_SHEET_NAME};
pub use importer::{convert_cell, ExcelImporter};
