//! Delimited list cells

/// Split a list cell into trimmed, non-empty items
///
/// Cells containing a newline are split per line, everything else on commas.
/// The choice is made per value: one export may mix both styles.
pub fn split_items(text: &str) -> Vec<String> {
    let delimiter = if text.contains('\n') { '\n' } else { ',' };
    text.split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
