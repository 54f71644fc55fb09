pub mod python;

use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Facts extracted from one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub imports: BTreeSet<String>,
    pub declared_types: BTreeSet<String>,
    pub declared_callables: BTreeSet<String>,
}

/// Pattern-based extraction for one source language.
///
/// Implementations approximate the grammar with line and token patterns; they
/// never build a syntax tree.
pub trait LanguageParser {
    fn language_name(&self) -> &str;

    /// File extensions (without the dot) this parser accepts
    fn extensions(&self) -> &[&str];

    /// Files that are skipped even when their extension matches
    fn is_excluded(&self, file_name: &str) -> bool;

    fn parse_source(&self, source: &str) -> ParseResult;

    /// Import target declared by a single line, if the line is an import statement
    fn import_target(&self, line: &str) -> Option<String>;

    /// Statement that imports `target` in the emitted header
    fn render_import(&self, target: &str) -> String;

    /// Prefix for generated comment lines
    fn comment_prefix(&self) -> &str;
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_parser(&self, language: &str) -> Result<Box<dyn LanguageParser>> {
        match language {
            "python" | "py" => Ok(Box::new(python::PythonParser::new()?)),
            _ => Err(Error::UnsupportedLanguage(language.to_string())),
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}
