use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use super::graph::{GraphBuilder, ModuleGraph};
use super::linearizer::{linearize, Linearization};
use super::scanner::FileScanner;
use super::unit::{ModuleSet, SourceUnit};
use crate::error::Result;
use crate::parsers::{LanguageParser, ParserFactory};

/// Result of one scan → graph → linearize run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub modules: ModuleSet,
    pub graph: ModuleGraph,
    pub linearization: Linearization,
}

impl Analysis {
    /// Units in emission order
    pub fn ordered_units(&self) -> impl Iterator<Item = &SourceUnit> {
        self.linearization
            .order
            .iter()
            .filter_map(|path| self.modules.get(path))
    }

    pub fn external_imports(&self) -> BTreeSet<String> {
        self.modules.external_imports()
    }
}

pub struct ModuleAnalyzer {
    file_scanner: FileScanner,
    parser: Box<dyn LanguageParser>,
}

impl ModuleAnalyzer {
    pub fn new(language: &str) -> Result<Self> {
        Ok(Self::with_parser(ParserFactory::new().get_parser(language)?))
    }

    pub fn with_parser(parser: Box<dyn LanguageParser>) -> Self {
        Self {
            file_scanner: FileScanner::new(),
            parser,
        }
    }

    pub fn parser(&self) -> &dyn LanguageParser {
        self.parser.as_ref()
    }

    /// Hand the parser on, e.g. to the formatter that emits the analyzed tree
    pub fn into_parser(self) -> Box<dyn LanguageParser> {
        self.parser
    }

    pub fn analyze(&self, root_path: &Path) -> Result<Analysis> {
        info!(root = %root_path.display(), language = self.parser.language_name(), "scanning files");
        let modules = self.file_scanner.scan(root_path, self.parser.as_ref())?;
        info!(
            units = modules.len(),
            packages = modules.packages().len(),
            "scan complete"
        );

        let graph = GraphBuilder::from_modules(&modules);
        info!(edges = graph.edge_count(), "dependency graph built");

        let linearization = linearize(&graph);

        Ok(Analysis {
            modules,
            graph,
            linearization,
        })
    }
}
