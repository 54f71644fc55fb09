use regex::Regex;

use super::{LanguageParser, ParseResult};
use crate::error::Result;

const IMPORT_PATTERN: &str = r"(?m)^(?:from\s+(\S+)\s+)?import\s+([^#\n]+)";
const CLASS_PATTERN: &str = r"class\s+(\w+)";
const DEF_PATTERN: &str = r"def\s+(\w+)";

/// Regex-driven Python fact extractor.
///
/// `class X` and `def X` are matched anywhere in the text, including nested
/// definitions, strings and comments. Imports are only recognized at the start
/// of a line.
pub struct PythonParser {
    import_pattern: Regex,
    class_pattern: Regex,
    def_pattern: Regex,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            import_pattern: Regex::new(IMPORT_PATTERN)?,
            class_pattern: Regex::new(CLASS_PATTERN)?,
            def_pattern: Regex::new(DEF_PATTERN)?,
        })
    }

    fn target_from(captures: &regex::Captures<'_>) -> Option<String> {
        if let Some(module) = captures.get(1) {
            // from X import Y
            return Some(module.as_str().to_string());
        }

        // import X, Y -> X
        captures
            .get(2)
            .and_then(|names| names.as_str().split(',').next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    fn names(pattern: &Regex, source: &str) -> std::collections::BTreeSet<String> {
        pattern
            .captures_iter(source)
            .filter_map(|captures| captures.get(1))
            .map(|name| name.as_str().to_string())
            .collect()
    }
}

impl LanguageParser for PythonParser {
    fn language_name(&self) -> &str {
        "python"
    }

    fn extensions(&self) -> &[&str] {
        &["py"]
    }

    fn is_excluded(&self, file_name: &str) -> bool {
        file_name == "__init__.py"
    }

    fn parse_source(&self, source: &str) -> ParseResult {
        let imports = self
            .import_pattern
            .captures_iter(source)
            .filter_map(|captures| Self::target_from(&captures))
            .collect();

        ParseResult {
            imports,
            declared_types: Self::names(&self.class_pattern, source),
            declared_callables: Self::names(&self.def_pattern, source),
        }
    }

    fn import_target(&self, line: &str) -> Option<String> {
        self.import_pattern
            .captures(line)
            .and_then(|captures| Self::target_from(&captures))
    }

    fn render_import(&self, target: &str) -> String {
        format!("import {target}")
    }

    fn comment_prefix(&self) -> &str {
        "#"
    }
}
