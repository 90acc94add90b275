//! Source code analysis module for depscan.
//!
//! Matches import-style statements in source lines against declared
//! dependencies. Matching is textual, line by line:
//!
//! - `const|let|var x = require('module')` and `import('module')` bindings
//! - ES6 `import ... from 'module'` (default, named, namespace, mixed)
//! - bare `require('module')` calls
//!
//! Statements spread over several lines, computed module paths and
//! re-exports are not matched.
//!
//! # Example
//!
//! ```ignore
//! use depscan::analysis::{search_declarations, search_usage};
//!
//! let declarations = search_declarations(&file.lines, "x.js", sets.production());
//! for usage in search_usage(&file.lines, "x.js", &declarations) {
//!     println!("{} seen {} times", usage.name, usage.occurrences);
//! }
//! ```

pub mod declarations;
pub mod missing;
pub mod patterns;
pub mod usage;

// Re-export main types for convenience
pub use declarations::{search_declarations, search_requires, Declaration, Reference};
pub use missing::{is_builtin, search_missing_dependencies, MissingRecord, NODE_BUILTINS};
pub use patterns::{package_name, ImportKind};
pub use usage::{search_usage, UsageRecord};
