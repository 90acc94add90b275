//! Report file output.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{Exporter, Palette, RenderMode, Report, TextExporter};

/// Name of the report file.
pub const REPORT_FILE_NAME: &str = "depscan.txt";

/// Writes the plain-text report to `depscan.txt` in the current directory.
///
/// Resolves to the written path once the file is on disk.
pub async fn file_report(report: &Report) -> io::Result<PathBuf> {
    let dir = std::env::current_dir()?;
    file_report_in(report, &dir).await
}

/// Writes the plain-text report to `depscan.txt` inside `dir`.
pub async fn file_report_in(report: &Report, dir: &Path) -> io::Result<PathBuf> {
    let mut buffer = Vec::new();
    TextExporter::new(Palette::plain(), RenderMode::Full).export(report, &mut buffer)?;

    let path = dir.join(REPORT_FILE_NAME);
    tokio::fs::write(&path, buffer).await?;
    info!(path = %path.display(), "wrote report file");

    Ok(path)
}
