//! End-to-end scan: manifest and source tree in, report out.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::{
    search_declarations, search_missing_dependencies, search_requires, search_usage,
};
use crate::config::ScanConfig;
use crate::parser::{search_dependencies, Dependency, DependencySets, ParseError};
use crate::reader::{find, read, ReadError};
use crate::report::{json_report, Report, ReportError};

/// Errors that abort a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("{path}: {source}")]
    Manifest {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result type for scans.
pub type ScanResult<T> = Result<T, ScanError>;

/// Runs the full pipeline for one project.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scans the configured root.
    ///
    /// Every source file is checked against production and development
    /// dependencies alike; unused development dependencies are only
    /// reported when `include_dev` is set.
    pub fn scan(&self) -> ScanResult<Report> {
        let root = self.config.root.as_path();
        let manifest_path = self.config.manifest_path();

        let manifest = read(&manifest_path)?;
        let all_sets =
            search_dependencies(&manifest.lines, false).map_err(|source| ScanError::Manifest {
                path: manifest_path.display().to_string(),
                source,
            })?;
        let declared: Vec<Dependency> = all_sets.iter().cloned().collect();
        debug!(dependencies = declared.len(), "parsed manifest");

        let mut usage = Vec::new();
        let mut requires = Vec::new();
        let mut missing = Vec::new();

        let files = find(root, &self.config.exclude_dirs)?;
        for path in &files {
            let file = read(path)?;
            let label = file_label(root, path);

            let declarations = search_declarations(&file.lines, &label, &declared);
            usage.extend(search_usage(&file.lines, &label, &declarations));
            requires.extend(search_requires(&file.lines, &label, &declared));
            missing.extend(search_missing_dependencies(&file.lines, &label, &all_sets));
        }

        info!(
            files = files.len(),
            usage = usage.len(),
            missing = missing.len(),
            "scan complete"
        );

        let reported_sets = if self.config.include_dev {
            all_sets
        } else {
            DependencySets::Production(all_sets.production().to_vec())
        };

        Ok(json_report(usage, reported_sets, requires)?.with_missing(missing))
    }
}

/// Labels a file by its `/`-separated path relative to the root.
fn file_label(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
