use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// One scanned source file and the facts extracted from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Location relative to the scan root
    pub path: PathBuf,
    pub content: String,
    /// Dotted import targets, e.g. `pkg.b` or `numpy as np`
    pub imports: BTreeSet<String>,
    pub declared_types: BTreeSet<String>,
    pub declared_callables: BTreeSet<String>,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            imports: BTreeSet::new(),
            declared_types: BTreeSet::new(),
            declared_callables: BTreeSet::new(),
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn with_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_types.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_callables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_callables
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Parent directory relative to the root in dotted form (`pkg/sub/a.py` -> `pkg.sub`).
    /// Empty for units that sit directly in the root.
    pub fn package_dir(&self) -> String {
        self.path
            .parent()
            .map(|parent| join_components(parent, "."))
            .unwrap_or_default()
    }

    /// `/`-separated path used in emitted headers, independent of the host platform
    pub fn display_path(&self) -> String {
        join_components(&self.path, "/")
    }

    /// Declared types followed by declared callables
    pub fn symbols(&self) -> impl Iterator<Item = &String> {
        self.declared_types.iter().chain(self.declared_callables.iter())
    }
}

fn join_components(path: &Path, separator: &str) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Every segment of a dotted import target except the last one.
///
/// Returns `None` when there is no non-empty prefix, so `os` and `.core` never
/// match a package.
pub fn package_prefix(target: &str) -> Option<&str> {
    target
        .rsplit_once('.')
        .map(|(prefix, _)| prefix)
        .filter(|prefix| !prefix.is_empty())
}

/// Scanned units keyed by path, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct ModuleSet {
    root: PathBuf,
    units: Vec<SourceUnit>,
    index: HashMap<PathBuf, usize>,
    packages: BTreeSet<String>,
}

impl ModuleSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register a unit. A path that is already present is rejected.
    pub fn insert(&mut self, unit: SourceUnit) -> Result<()> {
        if self.index.contains_key(&unit.path) {
            return Err(Error::DuplicateUnit(unit.path));
        }

        let package = unit.package_dir();
        if !package.is_empty() {
            self.packages.insert(package);
        }

        self.index.insert(unit.path.clone(), self.units.len());
        self.units.push(unit);
        Ok(())
    }

    pub fn get(&self, path: &Path) -> Option<&SourceUnit> {
        self.index.get(path).map(|&idx| &self.units[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Non-empty dotted package dirs of all units
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    /// Whether an import target refers to code inside the scanned tree.
    ///
    /// Relative imports always count as internal. Absolute targets are internal
    /// when they name a package dir or when their package prefix does.
    pub fn is_internal(&self, target: &str) -> bool {
        target.starts_with('.')
            || self.packages.contains(target)
            || package_prefix(target).is_some_and(|prefix| self.packages.contains(prefix))
    }

    /// Union of every unit's non-internal import targets
    pub fn external_imports(&self) -> BTreeSet<String> {
        self.units
            .iter()
            .flat_map(|unit| unit.imports.iter())
            .filter(|target| !self.is_internal(target))
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a SourceUnit;
    type IntoIter = std::slice::Iter<'a, SourceUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
