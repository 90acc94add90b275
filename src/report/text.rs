//! Text rendering, shared by the console and the report file.

use std::collections::BTreeSet;
use std::io::{self, Write};

use super::{Exporter, Palette, Report, Unused, NONE_SENTINEL};
use crate::parser::Dependency;

/// How much of the report to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Every section with every record.
    #[default]
    Full,
    /// One line per section.
    Summary,
}

/// Text exporter implementation.
#[derive(Debug, Clone, Copy)]
pub struct TextExporter {
    palette: Palette,
    mode: RenderMode,
}

impl TextExporter {
    pub fn new(palette: Palette, mode: RenderMode) -> Self {
        Self { palette, mode }
    }

    fn full<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        let p = &self.palette;

        writeln!(writer, "{}", p.magenta("Dependencies"))?;
        write_dependency_group(writer, "production", report.dependencies.production())?;
        if let Some(dev) = report.dependencies.dev() {
            write_dependency_group(writer, "development", dev)?;
        }
        writeln!(writer)?;

        writeln!(writer, "{}", p.magenta("Usage"))?;
        if report.usage.is_empty() {
            writeln!(writer, "  {}", NONE_SENTINEL)?;
        }
        for (name, total) in report.occurrences_by_dependency() {
            writeln!(writer, "  {} {}", name, p.count_badge(total))?;
            for record in report.usage.iter().filter(|u| u.name == name) {
                writeln!(
                    writer,
                    "    {}:{} {}",
                    record.file, record.line, record.declaration
                )?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "{}", p.magenta("Requires"))?;
        if report.requires.is_empty() {
            writeln!(writer, "  {}", NONE_SENTINEL)?;
        }
        for reference in &report.requires {
            writeln!(
                writer,
                "  {}:{} {}",
                reference.file, reference.line, reference.statement
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "{}", p.magenta("Unused dependencies"))?;
        writeln!(
            writer,
            "  production: {}",
            self.unused_list(&report.unused.production)
        )?;
        if let Some(dev) = &report.unused.dev {
            writeln!(writer, "  development: {}", self.unused_list(dev))?;
        }
        writeln!(writer)?;

        writeln!(writer, "{}", p.magenta("Missing dependencies"))?;
        if report.missing.is_empty() {
            writeln!(writer, "  {}", p.green(NONE_SENTINEL))?;
        }
        for missing in &report.missing {
            writeln!(
                writer,
                "  {} {}:{}",
                p.red(&missing.name),
                missing.file,
                missing.line
            )?;
        }

        Ok(())
    }

    fn summary<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        let p = &self.palette;
        let files: BTreeSet<&str> = report.usage.iter().map(|u| u.file.as_str()).collect();

        write!(
            writer,
            "{} {} production",
            p.magenta("Dependencies:"),
            report.dependencies.production().len()
        )?;
        if let Some(dev) = report.dependencies.dev() {
            write!(writer, ", {} development", dev.len())?;
        }
        writeln!(writer)?;

        writeln!(
            writer,
            "{} {} declarations in {} files",
            p.magenta("Usage:"),
            report.usage.len(),
            files.len()
        )?;
        writeln!(writer, "{} {}", p.magenta("Requires:"), report.requires.len())?;
        writeln!(
            writer,
            "{} {}",
            p.magenta("Unused production:"),
            self.unused_names(&report.unused.production)
        )?;
        if let Some(dev) = &report.unused.dev {
            writeln!(
                writer,
                "{} {}",
                p.magenta("Unused development:"),
                self.unused_names(dev)
            )?;
        }

        let missing: BTreeSet<&str> = report.missing.iter().map(|m| m.name.as_str()).collect();
        let missing = if missing.is_empty() {
            p.green(NONE_SENTINEL)
        } else {
            p.red(&missing.into_iter().collect::<Vec<_>>().join(", "))
        };
        writeln!(writer, "{} {}", p.magenta("Missing:"), missing)
    }

    fn unused_list(&self, unused: &Unused) -> String {
        match unused {
            Unused::None => self.palette.green(NONE_SENTINEL),
            Unused::Dependencies(_) => self.palette.yellow(&unused.to_string()),
        }
    }

    fn unused_names(&self, unused: &Unused) -> String {
        match unused {
            Unused::None => self.palette.green(NONE_SENTINEL),
            Unused::Dependencies(_) => self.palette.yellow(&unused.names().join(", ")),
        }
    }
}

impl Exporter for TextExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        match self.mode {
            RenderMode::Full => self.full(report, writer),
            RenderMode::Summary => self.summary(report, writer),
        }
    }
}

fn write_dependency_group<W: Write>(
    writer: &mut W,
    label: &str,
    deps: &[Dependency],
) -> io::Result<()> {
    writeln!(writer, "  {} ({})", label, deps.len())?;
    for dep in deps {
        writeln!(writer, "    {}", dep)?;
    }
    Ok(())
}

/// Prints the report to standard output.
pub fn console_report(report: &Report, palette: Palette, mode: RenderMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    TextExporter::new(palette, mode).export(report, &mut handle)?;
    handle.flush()
}
