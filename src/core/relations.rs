//! Direct-relation filtering and trading classification of BC app lists

use crate::config::ClassifierConfig;
use crate::error::{FormatterError, FormatterResult};
use regex::{Regex, RegexBuilder};

/// Apps split by trading scope, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub trading: Vec<String>,
    pub other: Vec<String>,
}

impl Classification {
    pub fn has_trading(&self) -> bool {
        !self.trading.is_empty()
    }
}

/// Recognises `(RelationType = Direct)` tagged items
#[derive(Debug, Clone)]
pub struct RelationClassifier {
    marker: Regex,
    trading_prefix: String,
    count_indirect_as_other: bool,
}

impl RelationClassifier {
    pub fn new(config: &ClassifierConfig) -> FormatterResult<Self> {
        let marker = RegexBuilder::new(&regex::escape(&config.marker))
            .case_insensitive(config.case_insensitive_marker)
            .build()
            .map_err(|e| FormatterError::Config(format!("Invalid relation marker: {}", e)))?;
        Ok(Self {
            marker,
            trading_prefix: config.trading_prefix.to_uppercase(),
            count_indirect_as_other: config.count_indirect_as_other,
        })
    }

    /// Aggregate annotations such as "(12 BC)" are never apps
    fn is_annotation(item: &str) -> bool {
        item.trim_start().starts_with('(')
    }

    /// Bare app name of a direct-relation item; a marker with no name is not an app
    pub fn direct_name(&self, item: &str) -> Option<String> {
        if Self::is_annotation(item) || !self.marker.is_match(item) {
            return None;
        }
        let name = self.marker.replace_all(item, "").trim().to_string();
        (!name.is_empty()).then_some(name)
    }

    pub fn is_trading(&self, name: &str) -> bool {
        name.to_uppercase().starts_with(&self.trading_prefix)
    }

    /// Split direct-relation items into trading and other apps
    pub fn classify<S: AsRef<str>>(&self, items: &[S]) -> Classification {
        let mut result = Classification::default();
        for item in items {
            let item: &str = item.as_ref();
            match self.direct_name(item) {
                Some(name) if self.is_trading(&name) => result.trading.push(name),
                Some(name) => result.other.push(name),
                None if self.count_indirect_as_other && !Self::is_annotation(item) => {
                    result.other.push(item.trim().to_string());
                }
                None => {}
            }
        }
        result
    }

    /// Number of direct-relation items, regardless of trading scope
    pub fn count_direct<S: AsRef<str>>(&self, items: &[S]) -> usize {
        items
            .iter()
            .filter(|item| {
                let item: &str = item.as_ref();
                self.direct_name(item).is_some()
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lists::split_items;

    fn classifier(config: ClassifierConfig) -> RelationClassifier {
        RelationClassifier::new(&config).unwrap()
    }

    #[test]
    fn test_classify_direct_only() {
        let items =
            split_items("ST-100 (RelationType = Direct), App2 (RelationType = Direct), App3");
        let result = classifier(ClassifierConfig::default()).classify(&items);
        assert_eq!(result.trading, vec!["ST-100"]);
        assert_eq!(result.other, vec!["App2"]);
    }

    #[test]
    fn test_trading_prefix_is_case_insensitive() {
        let classifier = classifier(ClassifierConfig::default());
        assert!(classifier.is_trading("stock-ledger"));
        assert!(classifier.is_trading("ST1"));
        assert!(!classifier.is_trading("Billing"));
    }

    #[test]
    fn test_annotation_items_skipped() {
        let classifier = classifier(ClassifierConfig::default());
        let items = vec!["(12 BC) (RelationType = Direct)", "  (Total)", "ST9 (RelationType = Direct)"];
        let result = classifier.classify(&items);
        assert_eq!(result.trading, vec!["ST9"]);
        assert!(result.other.is_empty());
        assert_eq!(classifier.count_direct(&items), 1);
    }

    #[test]
    fn test_marker_case_sensitive_by_default() {
        let items = vec!["App1 (relationtype = direct)"];
        assert!(classifier(ClassifierConfig::default()).classify(&items).other.is_empty());

        let config = ClassifierConfig {
            case_insensitive_marker: true,
            ..Default::default()
        };
        let result = classifier(config).classify(&items);
        assert_eq!(result.other, vec!["App1"]);
    }

    #[test]
    fn test_count_indirect_as_other() {
        let config = ClassifierConfig {
            count_indirect_as_other: true,
            ..Default::default()
        };
        let classifier = classifier(config);
        let items = vec!["ST1 (RelationType = Direct)", "App3", "(5 BC)"];
        let result = classifier.classify(&items);
        assert_eq!(result.trading, vec!["ST1"]);
        assert_eq!(result.other, vec!["App3"]);
        // Counting stays on the marker rule
        assert_eq!(classifier.count_direct(&items), 1);
    }

    #[test]
    fn test_direct_name_trims_and_rejects_annotations() {
        let classifier = classifier(ClassifierConfig::default());
        assert_eq!(
            classifier.direct_name("(RelationType = Direct) STX"),
            None,
            "leading parenthesis marks an annotation"
        );
        assert_eq!(
            classifier.direct_name("Payments  (RelationType = Direct)  "),
            Some("Payments".to_string())
        );
    }

    #[test]
    fn test_marker_without_name_is_not_counted() {
        let config = ClassifierConfig {
            marker: "DIRECT".to_string(),
            ..Default::default()
        };
        let classifier = classifier(config);
        let items = vec!["DIRECT", "  DIRECT DIRECT ", "ST4 DIRECT"];
        assert_eq!(classifier.direct_name("DIRECT"), None);
        let result = classifier.classify(&items);
        assert_eq!(result.trading, vec!["ST4"]);
        assert!(result.other.is_empty());
        assert_eq!(classifier.count_direct(&items), 1);
    }
}
