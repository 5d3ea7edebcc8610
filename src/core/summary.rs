//! Location / status / count summary line

use super::lists::split_items;
use super::relations::RelationClassifier;

/// Builds lines like `"NYC, Outage, 3 CIs, 2 BC (Direct)"`
#[derive(Debug, Clone, Copy)]
pub struct SummaryBuilder<'a> {
    classifier: &'a RelationClassifier,
}

impl<'a> SummaryBuilder<'a> {
    pub fn new(classifier: &'a RelationClassifier) -> Self {
        Self { classifier }
    }

    /// Location and status are always present, even when blank, so a missing
    /// location shows up as a leading comma. Count clauses are dropped at zero.
    pub fn build(&self, location: &str, status: &str, ci: &str, bc: &str, non_bc: &str) -> String {
        let mut parts = vec![location.to_string(), status.trim().to_string()];
        parts.extend(ci_clause(split_items(ci).len()));
        parts.extend(direct_clause(self.direct_count(bc), "BC"));
        parts.extend(direct_clause(self.direct_count(non_bc), "NON BC"));
        parts.join(", ")
    }

    fn direct_count(&self, text: &str) -> usize {
        self.classifier.count_direct(&split_items(text))
    }
}

fn ci_clause(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 CI".to_string()),
        n => Some(format!("{} CIs", n)),
    }
}

fn direct_clause(count: usize, label: &str) -> Option<String> {
    (count > 0).then(|| format!("{} {} (Direct)", count, label))
}
