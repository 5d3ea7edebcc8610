//! Per-record orchestration: one ChangeRecord in, one FormattedRecord out

use super::dates::date_line;
use super::lists::split_items;
use super::relations::RelationClassifier;
use super::summary::SummaryBuilder;
use crate::config::FormatterConfig;
use crate::error::{FormatterError, FormatterResult};
use crate::types::{ChangeRecord, Field, FormattedRecord};
use regex::{Regex, RegexBuilder};

pub struct RecordFormatter {
    classifier: RelationClassifier,
    risk_prefix: Option<Regex>,
}

impl RecordFormatter {
    pub fn new(config: &FormatterConfig) -> FormatterResult<Self> {
        config.validate()?;
        let risk_prefix = if config.risk_prefix.is_empty() {
            None
        } else {
            let pattern = format!("^{}", regex::escape(&config.risk_prefix));
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| FormatterError::Config(format!("Invalid risk prefix: {}", e)))?;
            Some(re)
        };

        Ok(Self {
            classifier: RelationClassifier::new(&config.classifier)?,
            risk_prefix,
        })
    }

    pub fn classifier(&self) -> &RelationClassifier {
        &self.classifier
    }

    /// Derive every output field; missing or malformed inputs degrade to
    /// blank text for that field only.
    pub fn format(&self, record: &ChangeRecord) -> FormattedRecord {
        let summary_line = SummaryBuilder::new(&self.classifier).build(
            &record.text(Field::Location),
            &record.text(Field::OnLineOrOutage),
            &record.text(Field::CI),
            &record.text(Field::BC),
            &record.text(Field::NonBC),
        );

        let apps = self.classifier.classify(&split_items(&record.text(Field::BC)));
        let trading_scope = if apps.has_trading() { "Yes" } else { "No" };

        FormattedRecord {
            row: record.row,
            date_line: date_line(record.get(Field::PlannedStart), record.get(Field::PlannedEnd)),
            title_line: record.text(Field::Title).trim().to_string(),
            summary_line,
            groups_line: record.text(Field::BusinessGroups).trim().to_string(),
            change_ref: change_reference(&record.text(Field::ChangeId), &record.text(Field::F4F)),
            risk_level: self.risk_level(&record.text(Field::RiskLevel)),
            trading_scope: trading_scope.to_string(),
            trading_apps: apps.trading,
            other_apps: apps.other,
        }
    }

    /// Records are independent; output order follows input order
    pub fn format_all(&self, records: &[ChangeRecord]) -> Vec<FormattedRecord> {
        records.iter().map(|record| self.format(record)).collect()
    }

    /// "SHELL_HIGH" -> "High"
    pub fn risk_level(&self, raw: &str) -> String {
        let raw = raw.trim();
        let stripped = match &self.risk_prefix {
            Some(re) => re.replace(raw, ""),
            None => raw.into(),
        };
        capitalize(stripped.trim())
    }
}

/// "CHG1 / F4F-2", or whichever half is present
pub fn change_reference(change_id: &str, f4f: &str) -> String {
    match (change_id.trim(), f4f.trim()) {
        ("", "") => String::new(),
        (id, "") => id.to_string(),
        ("", f4f) => f4f.to_string(),
        (id, f4f) => format!("{} / {}", id, f4f),
    }
}

/// First character uppercase, remainder lowercase
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
