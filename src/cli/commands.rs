use crate::config::FormatterConfig;
use crate::core::layout::{record_cells, TextStyle};
use crate::core::RecordFormatter;
use crate::error::FormatterResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::{ChangeSheet, FormattedRecord};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Config sources given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// YAML config file
    pub config: Option<PathBuf>,
    /// Input worksheet name
    pub sheet: Option<String>,
    /// Force case-insensitive marker matching
    pub case_insensitive: bool,
    /// Force counting untagged apps as "other"
    pub count_indirect_as_other: bool,
}

impl ConfigOptions {
    /// Defaults, then the config file, then flags
    pub fn resolve(&self) -> FormatterResult<FormatterConfig> {
        let mut config = match &self.config {
            Some(path) => FormatterConfig::load(path)?,
            None => FormatterConfig::default(),
        };
        if self.sheet.is_some() {
            config.sheet = self.sheet.clone();
        }
        if self.case_insensitive {
            config.classifier.case_insensitive_marker = true;
        }
        if self.count_indirect_as_other {
            config.classifier.count_indirect_as_other = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_records(
    input: &Path,
    config: &FormatterConfig,
) -> FormatterResult<(ChangeSheet, Vec<FormattedRecord>)> {
    let sheet = ExcelImporter::new(input)
        .with_sheet(config.sheet.clone())
        .import()?;
    let formatter = RecordFormatter::new(config)?;
    let formatted = formatter.format_all(&sheet.records);
    Ok((sheet, formatted))
}

/// Execute the format command
pub fn format(
    input: PathBuf,
    output: PathBuf,
    options: ConfigOptions,
    verbose: bool,
) -> FormatterResult<()> {
    println!("{}", "📋 Change Formatter".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let config = options.resolve()?;
    if verbose {
        println!("{}", "📖 Reading change records...".cyan());
    }

    let (sheet, formatted) = load_records(&input, &config)?;

    if verbose {
        println!(
            "   Sheet '{}': {} records, {} columns recognised",
            sheet.sheet_name.bright_blue(),
            sheet.records.len(),
            sheet.fields.len()
        );
        let in_scope = formatted.iter().filter(|r| r.has_trading_scope()).count();
        println!("   Trading scope: {} of {} changes\n", in_scope, formatted.len());
        println!("{}", "📊 Writing formatted workbook...".cyan());
    }

    ExcelExporter::new(formatted).export(&output)?;

    if !sheet.skipped_rows.is_empty() {
        let rows: Vec<String> = sheet.skipped_rows.iter().map(|r| r.to_string()).collect();
        println!(
            "{}",
            format!("⚠️  Skipped blank rows: {}", rows.join(", ")).yellow()
        );
    }
    println!("{}", "✅ Format Complete!".bold().green());
    println!(
        "   {} records written to {}\n",
        sheet.records.len(),
        output.display()
    );

    Ok(())
}

/// Execute the preview command
pub fn preview(
    input: PathBuf,
    rows: usize,
    json: bool,
    options: ConfigOptions,
) -> FormatterResult<()> {
    let config = options.resolve()?;
    let (sheet, formatted) = load_records(&input, &config)?;
    let shown: Vec<FormattedRecord> = formatted.into_iter().take(rows).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    println!("{}", "🔍 Change Formatter - Preview".bold().green());
    println!(
        "   Sheet: {} ({} of {} records)\n",
        sheet.sheet_name.bright_blue(),
        shown.len(),
        sheet.records.len()
    );

    for record in &shown {
        println!("{}", format!("── Row {} ──", record.row).bright_black());
        for cell in record_cells(record) {
            if cell.is_empty() {
                continue;
            }
            let text: String = cell
                .runs
                .iter()
                .map(|run| match run.style {
                    TextStyle::Bold => run.text.bold().to_string(),
                    TextStyle::Normal => run.text.clone(),
                })
                .collect();
            for line in text.lines().filter(|l| !l.is_empty()) {
                println!("   {}", line);
            }
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
