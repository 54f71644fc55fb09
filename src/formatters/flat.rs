use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::core::{Analysis, ModuleSet, SourceUnit};
use crate::error::{Error, Result};
use crate::parsers::{python::PythonParser, LanguageParser};

pub const GENERATOR_NAME: &str = "modweave";

/// Names already written by earlier units.
///
/// A later line is dropped when it contains any of these names as a raw
/// substring, so a unit mentioning `Path` anywhere after a `class Path` has
/// been emitted loses that line too.
#[derive(Debug, Clone, Default)]
pub struct EmissionState {
    emitted: BTreeSet<String>,
}

impl EmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppresses(&self, line: &str) -> bool {
        self.emitted.iter().any(|name| line.contains(name.as_str()))
    }

    pub fn record(&mut self, unit: &SourceUnit) {
        self.emitted.extend(unit.symbols().cloned());
    }

    pub fn emitted(&self) -> &BTreeSet<String> {
        &self.emitted
    }
}

/// Concatenates units into one flat source file
pub struct FlatFormatter {
    parser: Box<dyn LanguageParser>,
    timestamp: Option<String>,
}

impl FlatFormatter {
    pub fn new(parser: Box<dyn LanguageParser>) -> Self {
        Self {
            parser,
            timestamp: None,
        }
    }

    pub fn for_python() -> Result<Self> {
        Ok(Self::new(Box::new(PythonParser::new()?)))
    }

    /// Add a `Generated at` line to the header. Output is only reproducible
    /// between runs without one.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn parser(&self) -> &dyn LanguageParser {
        self.parser.as_ref()
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        let content = self.format(analysis);
        fs::write(output_path, content).map_err(|source| Error::Write {
            path: output_path.to_path_buf(),
            source,
        })
    }

    pub fn format(&self, analysis: &Analysis) -> String {
        self.render(&analysis.modules, analysis.ordered_units())
    }

    /// Render `units` in the given order against the module set they came from
    pub fn render<'a, I>(&self, modules: &ModuleSet, units: I) -> String
    where
        I: IntoIterator<Item = &'a SourceUnit>,
    {
        let comment = self.parser.comment_prefix();
        let mut output = vec![format!("{comment} Generated by {GENERATOR_NAME}")];
        if let Some(ref timestamp) = self.timestamp {
            output.push(format!("{comment} Generated at {timestamp}"));
        }

        output.push(format!("{comment} External imports"));
        // BTreeSet iteration is already sorted and unique
        output.extend(
            modules
                .external_imports()
                .iter()
                .map(|target| self.parser.render_import(target)),
        );
        output.push(String::new());
        output.push(format!("{comment} Combined module code"));
        output.push(String::new());

        let mut state = EmissionState::new();
        for unit in units {
            output.push(String::new());
            output.push(format!("{comment} From {}", unit.display_path()));
            output.push(self.unit_body(unit, modules, &state).join("\n"));
            state.record(unit);
        }

        output.join("\n")
    }

    /// Lines of `unit` that survive emission given what was written before it
    pub fn unit_body<'a>(
        &self,
        unit: &'a SourceUnit,
        modules: &ModuleSet,
        state: &EmissionState,
    ) -> Vec<&'a str> {
        let mut lines = Vec::new();
        for line in unit.content.split('\n') {
            if self.is_internal_import(line, modules) {
                continue;
            }
            if lines.is_empty() && line.trim().is_empty() {
                continue;
            }
            if state.suppresses(line) {
                continue;
            }
            lines.push(line);
        }
        lines
    }

    fn is_internal_import(&self, line: &str, modules: &ModuleSet) -> bool {
        self.parser
            .import_target(line)
            .is_some_and(|target| modules.is_internal(&target))
    }
}
