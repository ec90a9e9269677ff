use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static SNP_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\[(rs\d+?)\]\]").expect("static regex"));

static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)=(.*)").expect("static regex"));

/// Value of the first `key=value` line in `markup`, or an empty string.
///
/// The key matches whole and case-insensitively; the value runs to the end of the line.
pub fn field_value(markup: &str, key: &str) -> String {
    FIELD
        .captures_iter(markup)
        .find(|c| c[1].eq_ignore_ascii_case(key))
        .map(|c| c[2].trim_end_matches('\r').to_string())
        .unwrap_or_default()
}

/// Every `[[rsNNN]]` link on a page, deduplicated in order of first appearance.
pub fn snp_references(markup: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    SNP_REFERENCE
        .captures_iter(markup)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect()
}
