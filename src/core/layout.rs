//! Styled text runs for the output cells
//!
//! The exporter maps `TextStyle` to real workbook formats; nothing here owns
//! a format object, so the same layout can be rendered to a terminal too.

use crate::types::{FormattedRecord, PARAGRAPH_BREAK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Bold,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub style: TextStyle,
    pub text: String,
}

impl TextRun {
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            style: TextStyle::Bold,
            text: text.into(),
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            style: TextStyle::Normal,
            text: text.into(),
        }
    }
}

/// One output cell made of styled runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichCell {
    pub runs: Vec<TextRun>,
}

impl RichCell {
    /// Append a paragraph, separated from the previous one by a blank line.
    /// Empty paragraphs are dropped.
    fn push_paragraph(&mut self, runs: Vec<TextRun>) {
        let mut runs: Vec<TextRun> = runs.into_iter().filter(|r| !r.text.is_empty()).collect();
        if runs.is_empty() {
            return;
        }
        // Break is prefixed to the next run; no whitespace-only runs
        if !self.runs.is_empty() {
            runs[0].text.insert_str(0, PARAGRAPH_BREAK);
        }
        self.runs.extend(runs);
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Character count of the longest line, used for column widths
    pub fn widest_line(&self) -> usize {
        self.plain_text()
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }
}

pub const HEADERS: [&str; 3] = ["Change Details", "Change / Risk", "Trading / BC Apps"];

pub fn header_cells() -> Vec<RichCell> {
    HEADERS
        .iter()
        .map(|h| RichCell {
            runs: vec![TextRun::bold(*h)],
        })
        .collect()
}

/// Details, change/risk and apps cells for one record
pub fn record_cells(record: &FormattedRecord) -> Vec<RichCell> {
    let mut details = RichCell::default();
    details.push_paragraph(vec![TextRun::bold(&record.date_line)]);
    details.push_paragraph(vec![TextRun::bold(&record.title_line)]);
    details.push_paragraph(vec![TextRun::normal(&record.summary_line)]);
    details.push_paragraph(vec![TextRun::normal(&record.groups_line)]);

    let mut change_risk = RichCell::default();
    change_risk.push_paragraph(vec![TextRun::bold(&record.change_ref)]);
    change_risk.push_paragraph(vec![TextRun::normal(&record.risk_level)]);

    let mut apps = RichCell::default();
    for (label, value) in record.apps_paragraphs() {
        apps.push_paragraph(vec![TextRun::bold(label), TextRun::normal(value)]);
    }

    vec![details, change_risk, apps]
}
