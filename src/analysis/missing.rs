//! Missing-dependency finder.
//!
//! Flags module references whose package is declared in no dependency set.

use serde::Serialize;

use super::patterns::{module_references, package_name};
use crate::parser::DependencySets;
use crate::reader::SourceLine;

/// Node.js built-in modules. These are never reported as missing.
pub const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// A referenced package absent from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingRecord {
    pub name: String,
    pub file: String,
    pub line: usize,
}

/// Returns true for Node.js built-ins, including any `node:` specifier.
pub fn is_builtin(name: &str) -> bool {
    name.starts_with("node:") || NODE_BUILTINS.contains(&name)
}

/// Finds module references whose package no dependency set declares.
///
/// Scans every import-style statement afresh, one record per statement.
pub fn search_missing_dependencies(
    lines: &[SourceLine],
    file: &str,
    dependencies: &DependencySets,
) -> Vec<MissingRecord> {
    let mut missing = Vec::new();

    for line in lines {
        for (_, specifier) in module_references(&line.text) {
            let Some(pkg) = package_name(specifier) else {
                continue;
            };

            if is_builtin(pkg) || dependencies.contains(pkg) {
                continue;
            }

            missing.push(MissingRecord {
                name: pkg.to_string(),
                file: file.to_string(),
                line: line.line_number,
            });
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Dependency, DependencyType};
    use crate::reader::split_lines;

    fn sets() -> DependencySets {
        DependencySets::All {
            production: vec![Dependency::new("roi", "1.0.0", DependencyType::Production)],
            dev: vec![Dependency::new("tape", "^4.0.0", DependencyType::Development)],
        }
    }

    #[test]
    fn test_undeclared_package_is_missing() {
        let lines = split_lines("'use strict';\nconst express = require('express');\nconst app = express();");
        let missing = search_missing_dependencies(&lines, "p.js", &sets());

        assert_eq!(
            missing,
            vec![MissingRecord {
                name: "express".to_string(),
                file: "p.js".to_string(),
                line: 2,
            }]
        );
    }

    #[test]
    fn test_declared_in_any_set_is_not_missing() {
        let lines = split_lines("const roi = require('roi');\nconst test = require('tape');");
        assert!(search_missing_dependencies(&lines, "a.js", &sets()).is_empty());
    }

    #[test]
    fn test_production_only_sets() {
        let production_only = DependencySets::Production(vec![Dependency::new(
            "roi",
            "1.0.0",
            DependencyType::Production,
        )]);
        let lines = split_lines("const test = require('tape');");
        let missing = search_missing_dependencies(&lines, "a.js", &production_only);

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "tape");
    }

    #[test]
    fn test_builtins_excluded() {
        let source = "const fs = require('fs');\nimport path from 'path';\nimport { readFile } from 'node:fs/promises';\nconst p = require('fs/promises');";
        let lines = split_lines(source);
        assert!(search_missing_dependencies(&lines, "a.js", &sets()).is_empty());
    }

    #[test]
    fn test_relative_paths_ignored() {
        let lines = split_lines("const util = require('./util');\nimport x from '../x';");
        assert!(search_missing_dependencies(&lines, "a.js", &sets()).is_empty());
    }

    #[test]
    fn test_every_statement_shape() {
        let source = "import a from 'a';\nimport 'b';\nrequire('c');\nconst d = await import('d');";
        let lines = split_lines(source);
        let names: Vec<_> = search_missing_dependencies(&lines, "a.js", &sets())
            .into_iter()
            .map(|m| m.name)
            .collect();

        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_subpath_reported_by_package() {
        let lines = split_lines("import debounce from 'lodash/debounce';");
        let missing = search_missing_dependencies(&lines, "a.js", &sets());
        assert_eq!(missing[0].name, "lodash");
    }

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin("fs"));
        assert!(is_builtin("node:test"));
        assert!(!is_builtin("express"));
    }
}
