pub mod analyzer;
pub mod graph;
pub mod linearizer;
pub mod scanner;
pub mod unit;

pub use analyzer::{Analysis, ModuleAnalyzer};
pub use graph::{GraphBuilder, ImportEdge, ModuleGraph};
pub use linearizer::{linearize, Linearization};
pub use scanner::{FileInfo, FileScanner};
pub use unit::{package_prefix, ModuleSet, SourceUnit};
