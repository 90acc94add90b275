//! Parser for npm package.json files.
//!
//! This module parses a manifest and extracts the declared dependency
//! names in manifest field order.

use serde_json::{Map, Value};

use super::types::{Dependency, DependencySets, DependencyType, PackageJson};
use crate::reader::{join_lines, SourceLine};

/// Errors that can occur during package.json parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The package.json structure is invalid.
    #[error("Invalid package.json: {0}")]
    InvalidPackage(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use depscan::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

/// Extracts the dependency sets from manifest lines.
///
/// The `dependencies` field is always extracted. Unless `production_only`
/// is set, `devDependencies` is extracted too and both are returned as
/// [`DependencySets::All`].
///
/// # Example
///
/// ```
/// use depscan::parser::search_dependencies;
/// use depscan::reader::split_lines;
///
/// let lines = split_lines(r#"{"dependencies": {"roi": "1.0.0"}}"#);
/// let sets = search_dependencies(&lines, true).unwrap();
/// assert_eq!(sets.production()[0].name, "roi");
/// ```
pub fn search_dependencies(
    manifest_lines: &[SourceLine],
    production_only: bool,
) -> ParseResult<DependencySets> {
    let pkg = parse_str(&join_lines(manifest_lines))?;

    let production = collect(pkg.dependencies.as_ref(), DependencyType::Production)?;
    if production_only {
        return Ok(DependencySets::Production(production));
    }

    let dev = collect(pkg.dev_dependencies.as_ref(), DependencyType::Development)?;
    Ok(DependencySets::All { production, dev })
}

fn collect(
    field: Option<&Map<String, Value>>,
    dep_type: DependencyType,
) -> ParseResult<Vec<Dependency>> {
    let Some(field) = field else {
        return Ok(Vec::new());
    };

    field
        .iter()
        .map(|(name, version)| {
            if name.trim().is_empty() {
                return Err(ParseError::InvalidPackage(format!(
                    "empty dependency name in {} dependencies",
                    dep_type.label()
                )));
            }

            // Non-string versions are unusual but carried through as JSON text
            let version = match version {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            Ok(Dependency::new(name, version, dep_type))
        })
        .collect()
}
