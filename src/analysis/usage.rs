//! Usage ledger: how often each declared binding is referenced.

use serde::Serialize;

use super::declarations::Declaration;
use super::patterns::{bound_identifiers, identifiers};
use crate::reader::SourceLine;

/// One ledger entry per declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRecord {
    /// The dependency name.
    pub name: String,
    /// The declaration literal, e.g. `roi-require('roi')`.
    pub declaration: String,
    pub file: String,
    /// Line where the binding was introduced.
    pub line: usize,
    /// The declaring occurrence plus every other occurrence of a bound
    /// identifier in the file.
    pub occurrences: usize,
}

/// Builds the usage ledger for one file.
///
/// Every declaration yields exactly one record; nothing is filtered.
pub fn search_usage(
    lines: &[SourceLine],
    file_label: &str,
    declarations: &[Declaration],
) -> Vec<UsageRecord> {
    declarations
        .iter()
        .map(|declaration| UsageRecord {
            name: declaration.name.clone(),
            declaration: declaration.literal(),
            file: file_label.to_string(),
            line: declaration.line,
            occurrences: 1 + count_references(lines, declaration),
        })
        .collect()
}

fn count_references(lines: &[SourceLine], declaration: &Declaration) -> usize {
    let names = bound_identifiers(&declaration.binding);
    if names.is_empty() {
        return 0;
    }

    lines
        .iter()
        .map(|line| {
            let on_declaring_line = line.line_number == declaration.line;
            identifiers(&line.text)
                .filter(|(start, _)| !(on_declaring_line && declaration.span.contains(start)))
                .filter(|(_, token)| names.contains(token))
                .count()
        })
        .sum()
}
