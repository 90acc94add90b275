//! Declaration and require-call finders.
//!
//! Both finders run independently over the same lines, so a statement
//! such as `const roi = require('roi')` is reported by each of them.

use std::collections::HashSet;
use std::ops::Range;

use serde::Serialize;

use super::patterns::{binding_statements, package_name, require_calls, ImportKind};
use crate::parser::Dependency;
use crate::reader::SourceLine;

/// A statement binding a name to a declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// The dependency name.
    pub name: String,
    /// The literal bound text, e.g. `roi` or `{ get, post }`.
    pub binding: String,
    /// The matched module-reference literal, e.g. `require('roi')`.
    pub statement: String,
    pub kind: ImportKind,
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// Byte range of the whole statement within its line.
    #[serde(skip)]
    pub span: Range<usize>,
}

impl Declaration {
    /// The literal reported in usage records: `binding-statement`.
    pub fn literal(&self) -> String {
        format!("{}-{}", self.binding, self.statement)
    }
}

/// A `require(...)` call naming a declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub name: String,
    pub statement: String,
    pub file: String,
    pub line: usize,
}

fn declared_names(dependencies: &[Dependency]) -> HashSet<&str> {
    dependencies.iter().map(|d| d.name.as_str()).collect()
}

/// Finds import-style statements that bind a declared dependency.
///
/// Results are in line order, and left to right within a line.
pub fn search_declarations(
    lines: &[SourceLine],
    file: &str,
    dependencies: &[Dependency],
) -> Vec<Declaration> {
    let names = declared_names(dependencies);
    let mut declarations = Vec::new();

    for line in lines {
        for found in binding_statements(&line.text) {
            let Some(pkg) = package_name(found.module).filter(|p| names.contains(p)) else {
                continue;
            };

            declarations.push(Declaration {
                name: pkg.to_string(),
                binding: found.binding.to_string(),
                statement: found.statement.to_string(),
                kind: found.kind,
                file: file.to_string(),
                line: line.line_number,
                span: found.start..found.end,
            });
        }
    }

    declarations
}

/// Finds `require(...)` calls that name a declared dependency.
pub fn search_requires(
    lines: &[SourceLine],
    file: &str,
    dependencies: &[Dependency],
) -> Vec<Reference> {
    let names = declared_names(dependencies);
    let mut references = Vec::new();

    for line in lines {
        for call in require_calls(&line.text) {
            let Some(pkg) = package_name(call.module).filter(|p| names.contains(p)) else {
                continue;
            };

            references.push(Reference {
                name: pkg.to_string(),
                statement: call.statement.to_string(),
                file: file.to_string(),
                line: line.line_number,
            });
        }
    }

    references
}
