//! Shared types for dependency parsing.
//!
//! This module defines the core data structures used to represent
//! a package manifest and the dependencies it declares.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Represents the structure of a package.json file.
///
/// Only the fields needed for dependency reconciliation are captured.
/// Dependency maps keep the manifest's field order.
///
/// # Example
///
/// ```ignore
/// use depscan::parser::types::PackageJson;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package (semver format).
    pub version: Option<String>,

    /// Production dependencies required at runtime.
    pub dependencies: Option<Map<String, Value>>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<Map<String, Value>>,
}

/// Categorizes the type of dependency relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    /// Production dependencies - required at runtime.
    Production,

    /// Development dependencies - only needed during development.
    Development,
}

impl DependencyType {
    /// Returns a short label for the dependency type.
    pub fn label(&self) -> &'static str {
        match self {
            DependencyType::Production => "prod",
            DependencyType::Development => "dev",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
        };
        write!(f, "{}", s)
    }
}

/// Represents a single declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// The package name (e.g., "react", "lodash").
    pub name: String,

    /// The version specifier, carried verbatim (e.g., "^18.0.0").
    pub version: String,

    /// The category of this dependency.
    #[serde(rename = "type")]
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dep_type: DependencyType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dep_type,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Dependencies extracted from a manifest.
///
/// The shape is chosen by the caller: production only, or production
/// paired with development dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencySets {
    /// Only the `dependencies` field.
    Production(Vec<Dependency>),

    /// Both the `dependencies` and `devDependencies` fields.
    All {
        production: Vec<Dependency>,
        dev: Vec<Dependency>,
    },
}

impl DependencySets {
    /// The production dependencies, present in both shapes.
    pub fn production(&self) -> &[Dependency] {
        match self {
            DependencySets::Production(production) => production,
            DependencySets::All { production, .. } => production,
        }
    }

    /// The development dependencies, if they were extracted.
    pub fn dev(&self) -> Option<&[Dependency]> {
        match self {
            DependencySets::Production(_) => None,
            DependencySets::All { dev, .. } => Some(dev),
        }
    }

    /// Iterates over every extracted dependency, production first.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.production()
            .iter()
            .chain(self.dev().unwrap_or_default().iter())
    }

    /// Returns true if any set declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.production().len() + self.dev().map_or(0, |d| d.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
