//! Line-level patterns for import-style statements.
//!
//! Matching is textual: statements spanning several lines, computed module
//! paths and re-exports (`export ... from`) are not recognised.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;

/// The kind of import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImportKind {
    /// ES6 import statement: `import ... from 'module'`
    Es6,
    /// CommonJS require: `const x = require('module')`
    CommonJs,
    /// Dynamic import: `const x = await import('module')`
    DynamicImport,
}

/// `const|let|var <binding> = require('<module>')`
fn regex_require_binding() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"\b(?:const|let|var)\s+(?P<binding>[\p{L}_$][\w$]*|\{[^}]*\}|\[[^\]]*\])\s*=\s*(?P<call>require\s*\(\s*['"`](?P<module>[^'"`]+)['"`]\s*\))"#,
        )
        .expect("require binding pattern is valid")
    })
}

/// `const|let|var <binding> = [await] import('<module>')`
fn regex_dynamic_binding() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"\b(?:const|let|var)\s+(?P<binding>[\p{L}_$][\w$]*|\{[^}]*\}|\[[^\]]*\])\s*=\s*(?:await\s+)?(?P<call>import\s*\(\s*['"`](?P<module>[^'"`]+)['"`]\s*\))"#,
        )
        .expect("dynamic import binding pattern is valid")
    })
}

/// `import <binding> from '<module>'`
fn regex_es_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"\bimport\s+(?:type\s+)?(?P<binding>[\p{L}_$][\w$]*(?:\s*,\s*(?:\{[^}]*\}|\*\s*as\s+[\p{L}_$][\w$]*))?|\{[^}]*\}|\*\s*as\s+[\p{L}_$][\w$]*)\s*from\s*['"](?P<module>[^'"]+)['"]"#,
        )
        .expect("es import pattern is valid")
    })
}

/// `require('<module>')`, bound or not.
fn regex_require_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\brequire\s*\(\s*['"`](?P<module>[^'"`]+)['"`]\s*\)"#)
            .expect("require call pattern is valid")
    })
}

/// `import '<module>'`
fn regex_side_effect_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bimport\s*['"](?P<module>[^'"]+)['"]"#)
            .expect("side-effect import pattern is valid")
    })
}

/// `import('<module>')`
fn regex_dynamic_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bimport\s*\(\s*['"`](?P<module>[^'"`]+)['"`]\s*\)"#)
            .expect("dynamic import pattern is valid")
    })
}

fn regex_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{L}_$][\w$]*").expect("identifier pattern is valid"))
}

/// A statement that binds a name to a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingMatch<'a> {
    pub kind: ImportKind,
    /// The bound text: `roi`, `{ a, b }`, `* as ns`, `def, { x }`.
    pub binding: &'a str,
    /// The module specifier between the quotes.
    pub module: &'a str,
    /// The module-reference literal: the call for `require`/`import()`,
    /// the whole statement for `import ... from`.
    pub statement: &'a str,
    /// Byte offsets of the whole statement within the line.
    pub start: usize,
    pub end: usize,
}

/// A `require(...)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMatch<'a> {
    pub module: &'a str,
    pub statement: &'a str,
    pub start: usize,
}

/// Finds every binding statement on a line, left to right.
pub fn binding_statements(text: &str) -> Vec<BindingMatch<'_>> {
    let patterns = [
        (ImportKind::CommonJs, regex_require_binding()),
        (ImportKind::DynamicImport, regex_dynamic_binding()),
        (ImportKind::Es6, regex_es_import()),
    ];

    let mut found: Vec<BindingMatch<'_>> = patterns
        .into_iter()
        .flat_map(|(kind, re)| {
            re.captures_iter(text)
                .filter_map(move |caps| binding_from_captures(kind, &caps))
        })
        .collect();

    found.sort_by_key(|m| m.start);
    found
}

fn binding_from_captures<'a>(kind: ImportKind, caps: &Captures<'a>) -> Option<BindingMatch<'a>> {
    let whole = caps.get(0)?;
    let statement = match kind {
        ImportKind::Es6 => whole.as_str(),
        ImportKind::CommonJs | ImportKind::DynamicImport => caps.name("call")?.as_str(),
    };

    Some(BindingMatch {
        kind,
        binding: caps.name("binding")?.as_str().trim(),
        module: caps.name("module")?.as_str(),
        statement,
        start: whole.start(),
        end: whole.end(),
    })
}

/// Finds every `require(...)` call on a line, left to right.
pub fn require_calls(text: &str) -> Vec<CallMatch<'_>> {
    regex_require_call()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(CallMatch {
                module: caps.name("module")?.as_str(),
                statement: whole.as_str(),
                start: whole.start(),
            })
        })
        .collect()
}

/// Finds the specifier of every module reference on a line, left to right.
///
/// Each statement contributes once: require calls, `import ... from`,
/// side-effect imports and dynamic imports.
pub fn module_references(text: &str) -> Vec<(usize, &str)> {
    let patterns = [
        regex_require_call(),
        regex_es_import(),
        regex_side_effect_import(),
        regex_dynamic_import(),
    ];

    let mut found: Vec<(usize, &str)> = patterns
        .into_iter()
        .flat_map(|re| {
            re.captures_iter(text).filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((whole.start(), caps.name("module")?.as_str()))
            })
        })
        .collect();

    found.sort_by_key(|(start, _)| *start);
    found
}

/// Returns the identifier tokens of a line with their byte offsets.
///
/// A token must not continue a preceding word, so the `roi` inside
/// `éroi` or `0roi` is not reported.
pub fn identifiers(text: &str) -> impl Iterator<Item = (usize, &str)> {
    regex_identifier()
        .find_iter(text)
        .filter(move |m| {
            text[..m.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !is_identifier_char(c))
        })
        .map(|m| (m.start(), m.as_str()))
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Returns the package a module specifier belongs to.
///
/// `lodash/fp` belongs to `lodash`, `@scope/pkg/sub` to `@scope/pkg`.
/// Relative and absolute paths, and specifiers built with template
/// interpolation, belong to no package.
pub fn package_name(specifier: &str) -> Option<&str> {
    if specifier.is_empty()
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.contains("${")
    {
        return None;
    }

    let segments = if specifier.starts_with('@') { 2 } else { 1 };
    let end = specifier
        .match_indices('/')
        .nth(segments - 1)
        .map_or(specifier.len(), |(idx, _)| idx);

    Some(&specifier[..end])
}

/// Extracts the local names a binding introduces.
///
/// `roi` gives `roi`; `* as ns` gives `ns`; `{ a, b as c, d: e, f = 1 }`
/// gives `a c e f`; `def, { x }` gives `def x`.
pub fn bound_identifiers(binding: &str) -> Vec<&str> {
    binding
        .split(',')
        .filter_map(|part| {
            let part = part.trim_matches(|c: char| c.is_whitespace() || "{}[]".contains(c));
            let part = part.split('=').next().unwrap_or(part);
            let local = part.rsplit_once(':').map_or(part, |(_, alias)| alias);
            let local = local
                .trim_matches(|c: char| c.is_whitespace() || "{}[]".contains(c))
                .split_whitespace()
                .last()?
                .trim_start_matches("...");

            is_identifier(local).then_some(local)
        })
        .collect()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(is_identifier_char)
}
