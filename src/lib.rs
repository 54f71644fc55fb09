//! # MODWEAVE
//!
//! Flattens a multi-module Python source tree into a single file, ordered so that
//! every module appears after the modules it imports.
//!
//! ## Pipeline
//!
//! - **Scan**: walk the tree and extract imports, class names and function names
//!   from every module with cheap regex matchers
//! - **Graph**: link modules whose imports name another module's package
//! - **Linearize**: topological order, or scan order when the graph has a cycle
//! - **Emit**: one flat text file, or a notebook with the same text in one cell
//!
//! Extraction is approximate by construction. Definitions inside strings or
//! comments are picked up, relative imports never produce graph edges, and the
//! emitter drops any line that mentions a name already emitted by an earlier
//! module.

pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use error::{Error, Result};
