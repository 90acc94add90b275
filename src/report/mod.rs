//! Report assembly and rendering.
//!
//! [`json_report`] aggregates finder output into a [`Report`]. Renderers
//! only read it: [`console_report`] prints the text form to stdout,
//! [`file_report`] writes it to `depscan.txt`, and [`JsonExporter`]
//! produces the canonical JSON form.

pub mod file;
pub mod json;
pub mod palette;
pub mod text;

pub use file::{file_report, file_report_in, REPORT_FILE_NAME};
pub use json::JsonExporter;
pub use palette::Palette;
pub use text::{console_report, RenderMode, TextExporter};

use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::analysis::{Declaration, MissingRecord, Reference, UsageRecord};
use crate::parser::{Dependency, DependencySets};

/// Rendered in place of an empty unused list.
pub const NONE_SENTINEL: &str = "None.";

/// Errors raised while assembling a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Malformed report input: {0}")]
    Malformed(String),
}

/// Result type for report assembly.
pub type ReportResult<T> = Result<T, ReportError>;

/// Declared dependencies that no declaration binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unused {
    /// Every dependency is bound somewhere.
    None,
    /// The unbound dependencies, in declaration order.
    Dependencies(Vec<Dependency>),
}

impl Unused {
    fn from_list(list: Vec<Dependency>) -> Self {
        if list.is_empty() {
            Unused::None
        } else {
            Unused::Dependencies(list)
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Unused::None)
    }

    pub fn dependencies(&self) -> &[Dependency] {
        match self {
            Unused::None => &[],
            Unused::Dependencies(deps) => deps,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.dependencies().iter().map(|d| d.name.as_str()).collect()
    }
}

impl fmt::Display for Unused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unused::None => write!(f, "{}", NONE_SENTINEL),
            Unused::Dependencies(deps) => {
                let names: Vec<String> = deps.iter().map(|d| d.to_string()).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

impl Serialize for Unused {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Unused::None => serializer.serialize_str(NONE_SENTINEL),
            Unused::Dependencies(deps) => deps.serialize(serializer),
        }
    }
}

/// Unused dependencies per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedDependencies {
    pub production: Unused,
    /// Present only when development dependencies were extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<Unused>,
}

impl UnusedDependencies {
    pub fn is_empty(&self) -> bool {
        self.production.is_none() && self.dev.as_ref().map_or(true, Unused::is_none)
    }
}

/// The terminal artifact of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub dependencies: DependencySets,
    pub usage: Vec<UsageRecord>,
    pub requires: Vec<Reference>,
    pub unused: UnusedDependencies,
    pub missing: Vec<MissingRecord>,
}

impl Report {
    /// Attaches the missing-dependency records.
    pub fn with_missing(mut self, missing: Vec<MissingRecord>) -> Self {
        self.missing = missing;
        self
    }

    /// Returns true if anything is unused or missing.
    pub fn has_findings(&self) -> bool {
        !self.unused.is_empty() || !self.missing.is_empty()
    }

    /// Canonical JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Total occurrences per dependency, in order of first usage.
    pub fn occurrences_by_dependency(&self) -> Vec<(&str, usize)> {
        let mut totals: Vec<(&str, usize)> = Vec::new();
        for record in &self.usage {
            match totals.iter().position(|(name, _)| *name == record.name) {
                Some(idx) => totals[idx].1 += record.occurrences,
                None => totals.push((record.name.as_str(), record.occurrences)),
            }
        }
        totals
    }
}

/// Dependencies that no declaration binds.
///
/// Returns [`Unused::None`] rather than an empty list when everything
/// is bound.
pub fn unused(declarations: &[Declaration], dependencies: &[Dependency]) -> Unused {
    unused_by_name(declarations.iter().map(|d| d.name.as_str()), dependencies)
}

/// Dependencies with no entry in the usage ledger.
pub fn unused_from_usage(usage: &[UsageRecord], dependencies: &[Dependency]) -> Unused {
    unused_by_name(usage.iter().map(|u| u.name.as_str()), dependencies)
}

fn unused_by_name<'a>(
    bound: impl Iterator<Item = &'a str>,
    dependencies: &[Dependency],
) -> Unused {
    let bound: HashSet<&str> = bound.collect();
    Unused::from_list(
        dependencies
            .iter()
            .filter(|d| !bound.contains(d.name.as_str()))
            .cloned()
            .collect(),
    )
}

/// Aggregates finder output into a report.
///
/// Unused dependencies are derived from the usage ledger for each
/// extracted category. Missing records start empty; see
/// [`Report::with_missing`].
pub fn json_report(
    usage: Vec<UsageRecord>,
    dependencies: DependencySets,
    requires: Vec<Reference>,
) -> ReportResult<Report> {
    validate(&usage, &requires)?;

    let unused = UnusedDependencies {
        production: unused_from_usage(&usage, dependencies.production()),
        dev: dependencies.dev().map(|dev| unused_from_usage(&usage, dev)),
    };

    Ok(Report {
        dependencies,
        usage,
        requires,
        unused,
        missing: Vec::new(),
    })
}

fn validate(usage: &[UsageRecord], requires: &[Reference]) -> ReportResult<()> {
    for record in usage {
        if record.name.is_empty() || record.declaration.is_empty() {
            return Err(ReportError::Malformed(format!(
                "usage record in {} has an empty name or declaration",
                record.file
            )));
        }
        if record.line == 0 {
            return Err(ReportError::Malformed(format!(
                "usage record for {} has line 0",
                record.name
            )));
        }
    }

    for reference in requires {
        if reference.name.is_empty() || reference.statement.is_empty() || reference.line == 0 {
            return Err(ReportError::Malformed(format!(
                "require record in {} is incomplete",
                reference.file
            )));
        }
    }

    Ok(())
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Human-readable sections, as printed to the console
    Text,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format, uncolored.
pub fn export<W: Write>(format: ExportFormat, report: &Report, writer: &mut W) -> io::Result<()> {
    match format {
        ExportFormat::Text => {
            TextExporter::new(Palette::plain(), RenderMode::Full).export(report, writer)
        }
        ExportFormat::Json => JsonExporter.export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(format: ExportFormat, report: &Report) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
