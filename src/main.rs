use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use depscan::config::{ColorChoice, ScanConfig};
use depscan::report::{self, console_report, file_report, ExportFormat, Palette, RenderMode};
use depscan::Scanner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "depscan")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Finds unused and missing npm dependencies", long_about = None)]
struct Cli {
    /// Project root containing package.json
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Configuration file (defaults to depscan.toml in the project root)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also report unused devDependencies
    #[arg(short, long)]
    dev: bool,

    /// Additional directory names to skip
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Write the report to depscan.txt in the current directory
    #[arg(short, long)]
    file: bool,

    /// Print one line per section
    #[arg(short, long)]
    summary: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    format: ExportFormat,

    /// When to use colors
    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// Exit with status 1 when unused or missing dependencies are found
    #[arg(long)]
    ci: bool,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depscan=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    tracing::debug!(root = %config.root.display(), "starting scan");

    let report = Scanner::new(config.clone()).scan()?;

    match cli.format {
        ExportFormat::Text => {
            let palette = Palette::new(config.color.is_enabled(std::io::stdout().is_terminal()));
            let mode = if config.summary {
                RenderMode::Summary
            } else {
                RenderMode::Full
            };
            console_report(&report, palette, mode)?;
        }
        ExportFormat::Json => {
            report::export(ExportFormat::Json, &report, &mut std::io::stdout().lock())?;
        }
    }

    if config.report_file {
        let path = file_report(&report).await?;
        eprintln!("Report written to {}", path.display());
    }

    if cli.ci && report.has_findings() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn build_config(cli: &Cli) -> anyhow::Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig {
            root: cli.path.clone(),
            ..ScanConfig::from_file(path)?
        },
        None => ScanConfig::load(&cli.path)?,
    };

    config.include_dev |= cli.dev;
    config.report_file |= cli.file;
    config.summary |= cli.summary;
    config.exclude_dirs.extend(cli.exclude.iter().cloned());
    if let Some(color) = cli.color {
        config.color = color.into();
    }

    Ok(config)
}
