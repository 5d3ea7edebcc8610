//! Change Formatter - change-record spreadsheets to formatted change summaries
//!
//! This library reads a change-record export (.xlsx), derives the summary
//! text for every change and writes a formatted workbook.
//!
//! # Features
//!
//! - Planned dates rendered as "9th April 2025", collapsed when start = end
//! - Comma- or newline-delimited list cells
//! - `(RelationType = Direct)` BC apps split into trading / other apps
//! - One-line location, status and count summaries
//! - Rich-text Excel output with bold labels
//!
//! # Example
//!
//! ```no_run
//! use change_formatter::config::FormatterConfig;
//! use change_formatter::core::RecordFormatter;
//! use change_formatter::excel::{ExcelExporter, ExcelImporter};
//! use std::path::Path;
//!
//! let sheet = ExcelImporter::new("changes.xlsx").import()?;
//! let formatter = RecordFormatter::new(&FormatterConfig::default())?;
//! let formatted = formatter.format_all(&sheet.records);
//!
//! println!("Records: {}", formatted.len());
//!
//! ExcelExporter::new(formatted).export(Path::new("formatted_output.xlsx"))?;
//! # Ok::<(), change_formatter::error::FormatterError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use config::FormatterConfig;
pub use error::{FormatterError, FormatterResult};
pub use types::{CellValue, ChangeRecord, Field, FormattedRecord};
