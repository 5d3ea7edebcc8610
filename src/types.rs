use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

//==============================================================================
// Input Cells
//==============================================================================

/// A single input cell, as read from the change-record sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Native date/time (Excel date cell)
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// True for `Empty` and for whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Textual representation of the cell
    ///
    /// Integral numbers drop the trailing `.0` so that numeric change ids read
    /// back the way they were typed.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

//==============================================================================
// Change Records
//==============================================================================

/// Columns the formatter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PlannedStart,
    PlannedEnd,
    Title,
    Location,
    OnLineOrOutage,
    BusinessGroups,
    CI,
    BC,
    NonBC,
    ChangeId,
    F4F,
    RiskLevel,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::PlannedStart,
        Field::PlannedEnd,
        Field::Title,
        Field::Location,
        Field::OnLineOrOutage,
        Field::BusinessGroups,
        Field::CI,
        Field::BC,
        Field::NonBC,
        Field::ChangeId,
        Field::F4F,
        Field::RiskLevel,
    ];

    /// Columns whose total absence means the sheet is not a change export
    pub const ESSENTIAL: [Field; 4] = [
        Field::PlannedStart,
        Field::Title,
        Field::ChangeId,
        Field::BC,
    ];

    /// Header spellings seen in change exports
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::PlannedStart => &["PlannedStart", "Planned Start", "Planned Start Date"],
            Field::PlannedEnd => &["PlannedEnd", "Planned End", "Planned End Date"],
            Field::Title => &["Title", "Short Description"],
            Field::Location => &["Location"],
            Field::OnLineOrOutage => &["OnLine/Outage", "OnLineOrOutage", "Outage Type"],
            Field::BusinessGroups => &["BusinessGroups", "Business Groups", "Business Affected"],
            Field::CI => &["CI", "CIs"],
            Field::BC => &["BC", "BC Apps"],
            Field::NonBC => &["NonBC", "NONBC", "Non-BC", "Non BC Apps"],
            Field::ChangeId => &["ChangeId", "Change ID", "Change", "Number"],
            Field::F4F => &["F4F"],
            Field::RiskLevel => &["RiskLevel", "Risk Level", "Risk"],
        }
    }

    /// Canonical column name
    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Match a header cell against the known aliases
    ///
    /// Comparison ignores case and any non-alphanumeric characters, so
    /// `"OnLine/Outage"`, `"online outage"` and `"ONLINE_OUTAGE"` all match.
    pub fn from_header(header: &str) -> Option<Field> {
        let wanted = normalize_header(header);
        if wanted.is_empty() {
            return None;
        }
        Field::ALL.into_iter().find(|field| {
            field
                .aliases()
                .iter()
                .any(|alias| normalize_header(alias) == wanted)
        })
    }
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// One row of the input sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRecord {
    /// 1-based row number in the source sheet (0 when built in memory)
    pub row: usize,
    values: HashMap<Field, CellValue>,
}

impl ChangeRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: HashMap::new(),
        }
    }

    /// Build a record from header/text pairs; unknown headers are ignored
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (header, value) in pairs {
            if let Some(field) = Field::from_header(header) {
                record.set(field, CellValue::from(value));
            }
        }
        record
    }

    pub fn set(&mut self, field: Field, value: CellValue) {
        self.values.insert(field, value);
    }

    /// Value of a field; absent and blank cells both read as `None`
    pub fn get(&self, field: Field) -> Option<&CellValue> {
        self.values.get(&field).filter(|v| !v.is_blank())
    }

    /// Text of a field, substituting `""` when absent
    pub fn text(&self, field: Field) -> String {
        self.get(field).map(CellValue::as_text).unwrap_or_default()
    }

    /// True when no recognised field carries a value
    pub fn is_blank(&self) -> bool {
        self.values.values().all(CellValue::is_blank)
    }
}

/// Records read from one worksheet
#[derive(Debug, Clone, Default)]
pub struct ChangeSheet {
    pub sheet_name: String,
    pub records: Vec<ChangeRecord>,
    /// Source rows dropped because every recognised field was blank
    pub skipped_rows: Vec<usize>,
    /// Recognised columns, in sheet order
    pub fields: Vec<Field>,
}

//==============================================================================
// Formatted Output
//==============================================================================

/// Output projection of one change record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormattedRecord {
    pub row: usize,
    pub date_line: String,
    pub title_line: String,
    pub summary_line: String,
    pub groups_line: String,
    pub change_ref: String,
    pub risk_level: String,
    /// "Yes" when at least one trading app was found
    pub trading_scope: String,
    pub trading_apps: Vec<String>,
    pub other_apps: Vec<String>,
}

/// Paragraph separator inside a single output cell
pub const PARAGRAPH_BREAK: &str = "\n\n";

impl FormattedRecord {
    pub fn has_trading_scope(&self) -> bool {
        !self.trading_apps.is_empty()
    }

    /// Change reference and risk level as one cell text
    pub fn change_risk_line(&self) -> String {
        [self.change_ref.as_str(), self.risk_level.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK)
    }

    /// Labelled paragraphs describing the trading scope
    ///
    /// Other apps are folded into a single "BC Apps" line when nothing is in
    /// trading scope, and listed separately otherwise.
    pub fn apps_paragraphs(&self) -> Vec<(&'static str, String)> {
        if self.has_trading_scope() {
            vec![
                ("Trading Scope: ", self.trading_scope.clone()),
                ("Trading Apps: ", self.trading_apps.join(", ")),
                ("Other BC Apps: ", join_or(&self.other_apps, "None")),
            ]
        } else {
            vec![
                ("Trading Scope: ", self.trading_scope.clone()),
                ("BC Apps: ", join_or(&self.other_apps, "No")),
            ]
        }
    }

    pub fn apps_block(&self) -> String {
        self.apps_paragraphs()
            .into_iter()
            .map(|(label, value)| format!("{}{}", label, value))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK)
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_header_aliases() {
        assert_eq!(Field::from_header("OnLine/Outage"), Some(Field::OnLineOrOutage));
        assert_eq!(Field::from_header("NONBC"), Some(Field::NonBC));
        assert_eq!(Field::from_header("NonBC"), Some(Field::NonBC));
        assert_eq!(Field::from_header(" planned start "), Some(Field::PlannedStart));
        assert_eq!(Field::from_header("Unrelated"), None);
        assert_eq!(Field::from_header(""), None);
    }

    #[test]
    fn test_record_text_defaults_to_empty() {
        let record = ChangeRecord::from_pairs([("Title", "  Patch  "), ("Location", "")]);
        assert_eq!(record.text(Field::Title), "  Patch  ");
        assert_eq!(record.text(Field::Location), "");
        assert_eq!(record.text(Field::BC), "");
        assert!(record.get(Field::Location).is_none());
    }

    #[test]
    fn test_cell_value_as_text_integral_number() {
        assert_eq!(CellValue::Number(12345.0).as_text(), "12345");
        assert_eq!(CellValue::Number(1.5).as_text(), "1.5");
        assert_eq!(CellValue::Bool(true).as_text(), "true");
    }

    #[test]
    fn test_blank_record() {
        let mut record = ChangeRecord::new(4);
        record.set(Field::Title, CellValue::Text("   ".to_string()));
        record.set(Field::BC, CellValue::Empty);
        assert!(record.is_blank());
        record.set(Field::CI, CellValue::Number(0.0));
        assert!(!record.is_blank());
    }

    #[test]
    fn test_apps_block_without_trading_scope() {
        let record = FormattedRecord {
            trading_scope: "No".to_string(),
            other_apps: vec!["App2".to_string()],
            ..Default::default()
        };
        assert_eq!(record.apps_block(), "Trading Scope: No\n\nBC Apps: App2");

        let empty = FormattedRecord {
            trading_scope: "No".to_string(),
            ..Default::default()
        };
        assert_eq!(empty.apps_block(), "Trading Scope: No\n\nBC Apps: No");
    }

    #[test]
    fn test_apps_block_with_trading_scope() {
        let record = FormattedRecord {
            trading_scope: "Yes".to_string(),
            trading_apps: vec!["ST1".to_string(), "ST2".to_string()],
            ..Default::default()
        };
        assert_eq!(
            record.apps_block(),
            "Trading Scope: Yes\n\nTrading Apps: ST1, ST2\n\nOther BC Apps: None"
        );
    }

    #[test]
    fn test_change_risk_line_skips_empty_parts() {
        let record = FormattedRecord {
            change_ref: "CHG001".to_string(),
            risk_level: "High".to_string(),
            ..Default::default()
        };
        assert_eq!(record.change_risk_line(), "CHG001\n\nHigh");

        let risk_only = FormattedRecord {
            risk_level: "Low".to_string(),
            ..Default::default()
        };
        assert_eq!(risk_only.change_risk_line(), "Low");
    }
}
