//! End-to-end checks against the fixture project in `tests/fixtures`.

use std::path::{Path, PathBuf};

use depscan::analysis::{
    search_declarations, search_missing_dependencies, search_requires, search_usage,
};
use depscan::parser::search_dependencies;
use depscan::reader::{find, read, DEFAULT_EXCLUDED_DIRS};
use depscan::report::{
    self, console_report, file_report_in, json_report, ExportFormat, Exporter, Palette,
    RenderMode, TextExporter,
};
use depscan::{ScanConfig, Scanner};

fn fixture(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(rel)
}

fn x_js_report() -> depscan::Report {
    let manifest = read(&fixture("package.json")).unwrap();
    let sets = search_dependencies(&manifest.lines, false).unwrap();
    let source = read(&fixture("foo/x.js")).unwrap();

    let declarations = search_declarations(&source.lines, "x.js", sets.production());
    let requires = search_requires(&source.lines, "x.js", sets.production());
    let usage = search_usage(&source.lines, "x.js", &declarations);

    json_report(usage, sets, requires).unwrap()
}

#[test]
fn reads_source_lines() {
    let file = read(&fixture("foo/x.js")).unwrap();

    assert!(file.to_text().contains("require"));
    assert_eq!(file.lines[3].line_number, 4);
    assert_eq!(file.lines[3].text, "const roi = require('roi');");
}

#[test]
fn find_skips_dependency_caches() {
    let files = find(&fixture(""), DEFAULT_EXCLUDED_DIRS).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(fixture("")).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert!(names.contains(&"foo/x.js".to_string()));
    assert!(names.contains(&"xpto/abc/temp/p.js".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("node_modules")));
    assert!(!names.iter().any(|n| n.ends_with(".json")));
}

#[test]
fn production_dependencies_keep_manifest_order() {
    let manifest = read(&fixture("package.json")).unwrap();
    let sets = search_dependencies(&manifest.lines, true).unwrap();

    let names: Vec<&str> = sets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["fidelity", "request", "roi"]);
    assert!(sets.dev().is_none());
}

#[test]
fn usage_records_declaration_literal() {
    let report = x_js_report();

    assert_eq!(report.usage.len(), 1);
    let record = &report.usage[0];
    assert_eq!(record.declaration, "roi-require('roi')");
    assert_eq!(record.file, "x.js");
    assert_eq!(record.line, 4);
    assert_eq!(record.occurrences, 2);
}

#[test]
fn requires_are_recorded() {
    let report = x_js_report();

    assert_eq!(report.requires.len(), 1);
    assert_eq!(report.requires[0].statement, "require('roi')");
}

#[test]
fn unused_in_declaration_order() {
    let manifest = read(&fixture("package.json")).unwrap();
    let sets = search_dependencies(&manifest.lines, false).unwrap();
    let source = read(&fixture("foo/x.js")).unwrap();
    let declarations = search_declarations(&source.lines, "x.js", sets.production());

    let unused = report::unused(&declarations, sets.production());
    assert_eq!(unused.names(), vec!["fidelity", "request"]);
}

#[test]
fn unused_is_none_sentinel_when_everything_is_bound() {
    let manifest = read(&fixture("bar/package.json")).unwrap();
    let sets = search_dependencies(&manifest.lines, false).unwrap();
    let source = read(&fixture("bar/index.js")).unwrap();
    let declarations = search_declarations(&source.lines, "index.js", sets.production());

    let unused = report::unused(&declarations, sets.production());
    assert!(unused.is_none());
    assert_eq!(unused.to_string(), "None.");
    assert_eq!(serde_json::to_string(&unused).unwrap(), "\"None.\"");
}

#[test]
fn unused_lists_every_unbound_dependency() {
    let manifest = read(&fixture("bar/package.json")).unwrap();
    let sets = search_dependencies(&manifest.lines, false).unwrap();
    let source = read(&fixture("bar/all-unused.js")).unwrap();
    let declarations = search_declarations(&source.lines, "all-unused.js", sets.production());

    let unused = report::unused(&declarations, sets.production());
    assert_eq!(unused.names(), vec!["roi"]);
}

#[test]
fn missing_dependencies_exclude_builtins() {
    let manifest = read(&fixture("package.json")).unwrap();
    let sets = search_dependencies(&manifest.lines, true).unwrap();
    let source = read(&fixture("xpto/abc/temp/p.js")).unwrap();

    let missing = search_missing_dependencies(&source.lines, "p.js", &sets);
    let names: Vec<&str> = missing.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["express"]);
    assert_eq!(missing[0].line, 2);
}

#[test]
fn text_report_mentions_bound_dependency() {
    let report = x_js_report();
    let mut output = Vec::new();
    TextExporter::new(Palette::plain(), RenderMode::Full)
        .export(&report, &mut output)
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("roi"));
    assert!(text.contains("x.js:4"));
    assert!(console_report(&report, Palette::plain(), RenderMode::Summary).is_ok());
}

#[tokio::test]
async fn file_report_is_written() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = file_report_in(&x_js_report(), dir.path()).await.unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("roi"));
}

#[test]
fn scanner_covers_the_fixture_project() {
    let config = ScanConfig {
        root: fixture(""),
        ..ScanConfig::default()
    };
    let report = Scanner::new(config).scan().unwrap();

    let usage_files: Vec<&str> = report.usage.iter().map(|u| u.file.as_str()).collect();
    assert_eq!(usage_files, vec!["bar/index.js", "foo/x.js"]);
    assert_eq!(report.unused.production.names(), vec!["fidelity", "request"]);
    assert!(report.unused.dev.is_none());

    let missing: Vec<&str> = report.missing.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(missing, vec!["express"]);
    assert_eq!(report.missing[0].file, "xpto/abc/temp/p.js");
    assert!(report.has_findings());
}

#[test]
fn scanner_output_is_byte_identical_across_runs() {
    let scan = || {
        let config = ScanConfig {
            root: fixture(""),
            include_dev: true,
            ..ScanConfig::default()
        };
        let report = Scanner::new(config).scan().unwrap();
        report::export_to_string(ExportFormat::Json, &report).unwrap()
    };

    assert_eq!(scan(), scan());
}
