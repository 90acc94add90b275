//! Parser module for depscan.
//!
//! Parses npm `package.json` manifests into the dependency sets the
//! scanner reconciles against source code.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use depscan::parser::search_dependencies;
//! use depscan::reader::read;
//!
//! let manifest = read(Path::new("package.json"))?;
//! let sets = search_dependencies(&manifest.lines, false)?;
//!
//! println!("Found {} production dependencies", sets.production().len());
//! ```

pub mod package_json;
pub mod types;

// Re-export commonly used types for convenience
pub use package_json::{parse_str, search_dependencies, ParseError, ParseResult};

pub use types::{Dependency, DependencySets, DependencyType, PackageJson};
