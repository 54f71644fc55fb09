use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::flat::{FlatFormatter, GENERATOR_NAME};
use crate::core::Analysis;
use crate::error::{Error, Result};

const DEFAULT_TITLE: &str = "Combined Module Notebook";
const DEFAULT_USAGE_EXAMPLE: &[&str] = &[
    "# Example usage",
    "# Every module above is defined in this notebook, so its names can be used directly.",
    "print(sorted(name for name in globals() if not name.startswith('_')))",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Markdown {
        metadata: Map<String, Value>,
        source: Vec<String>,
    },
    Code {
        metadata: Map<String, Value>,
        source: Vec<String>,
        execution_count: Option<u32>,
        outputs: Vec<Value>,
    },
}

impl Cell {
    pub fn markdown(source: Vec<String>) -> Self {
        Cell::Markdown {
            metadata: Map::new(),
            source,
        }
    }

    pub fn code(source: Vec<String>) -> Self {
        Cell::Code {
            metadata: Map::new(),
            source,
            execution_count: None,
            outputs: Vec::new(),
        }
    }

    pub fn source(&self) -> &[String] {
        match self {
            Cell::Markdown { source, .. } | Cell::Code { source, .. } => source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub display_name: String,
    pub language: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    pub kernelspec: KernelSpec,
}

/// nbformat 4 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

/// Wraps the flat output into a four-cell notebook: title, combined code,
/// usage heading, usage snippet
pub struct NotebookFormatter {
    flat: FlatFormatter,
    title: String,
    usage_example: Vec<String>,
}

impl NotebookFormatter {
    pub fn new(flat: FlatFormatter) -> Self {
        Self {
            flat,
            title: DEFAULT_TITLE.to_string(),
            usage_example: DEFAULT_USAGE_EXAMPLE.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_usage_example<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.usage_example = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn flat(&self) -> &FlatFormatter {
        &self.flat
    }

    pub fn format_to_file(&self, analysis: &Analysis, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.build(analysis))?;
        fs::write(output_path, json).map_err(|source| Error::Write {
            path: output_path.to_path_buf(),
            source,
        })
    }

    /// The flat text is rendered in memory; nothing intermediate touches disk
    pub fn build(&self, analysis: &Analysis) -> Notebook {
        let code = self.flat.format(analysis);
        let language = self.flat.parser().language_name().to_string();

        Notebook {
            cells: vec![
                Cell::markdown(vec![
                    format!("# {}\n", self.title),
                    format!("This notebook was generated by {GENERATOR_NAME}."),
                ]),
                Cell::code(source_lines(&code)),
                Cell::markdown(vec!["## Usage Example".to_string()]),
                Cell::code(source_lines(&self.usage_example.join("\n"))),
            ],
            metadata: NotebookMetadata {
                kernelspec: KernelSpec {
                    display_name: "Python 3".to_string(),
                    language,
                    name: "python3".to_string(),
                },
            },
            nbformat: 4,
            nbformat_minor: 4,
        }
    }
}

/// Split text the way nbformat stores it: every line keeps its `\n` except the last
pub fn source_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}
