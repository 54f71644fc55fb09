use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::unit::{ModuleSet, SourceUnit};
use crate::error::{Error, Result};
use crate::parsers::LanguageParser;

#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Absolute (or root-joined) location used for reading
    pub path: PathBuf,
    /// Location relative to the scan root
    pub relative_path: PathBuf,
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate every file the parser accepts, sorted by file name within each
    /// directory so repeated runs see the same order.
    ///
    /// Walk errors abort the scan instead of being skipped.
    pub fn scan_directory(
        &self,
        root_path: &Path,
        parser: &dyn LanguageParser,
    ) -> Result<Vec<FileInfo>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }

            let path = entry.path();
            let accepted = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| parser.extensions().contains(&ext));
            let excluded = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| parser.is_excluded(name));
            if !accepted || excluded {
                continue;
            }

            let relative_path = path
                .strip_prefix(root_path)
                .map_err(|_| Error::OutsideRoot {
                    path: path.to_path_buf(),
                    root: root_path.to_path_buf(),
                })?
                .to_path_buf();

            files.push(FileInfo {
                path: path.to_path_buf(),
                relative_path,
            });
        }

        Ok(files)
    }

    /// Read and extract every eligible file under `root_path` into a [`ModuleSet`]
    pub fn scan(&self, root_path: &Path, parser: &dyn LanguageParser) -> Result<ModuleSet> {
        let files = self.scan_directory(root_path, parser)?;
        let mut modules = ModuleSet::new(root_path);

        for file_info in files {
            let raw = fs::read_to_string(&file_info.path).map_err(|source| Error::Read {
                path: file_info.path.clone(),
                source,
            })?;
            let content = normalize_newlines(raw);
            let facts = parser.parse_source(&content);

            debug!(
                path = %file_info.relative_path.display(),
                imports = facts.imports.len(),
                types = facts.declared_types.len(),
                callables = facts.declared_callables.len(),
                "scanned unit"
            );

            let unit = SourceUnit::new(file_info.relative_path, content)
                .with_imports(facts.imports)
                .with_types(facts.declared_types)
                .with_callables(facts.declared_callables);
            modules.insert(unit)?;
        }

        Ok(modules)
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
