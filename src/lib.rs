//! depscan - finds unused and missing npm dependencies
//!
//! This crate reconciles the dependencies declared in a `package.json`
//! against the import-style statements found in a project's
//! JavaScript/TypeScript sources.

pub mod analysis;
pub mod config;
pub mod parser;
pub mod reader;
pub mod report;
pub mod scan;

pub use config::ScanConfig;
pub use report::Report;
pub use scan::{ScanError, ScanResult, Scanner};
