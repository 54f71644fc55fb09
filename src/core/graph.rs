use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::{Directed, Graph};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::unit::{package_prefix, ModuleSet};

/// Why an edge exists: the import target that matched the dependency's package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    pub target: String,
}

impl ImportEdge {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// Nodes are unit paths, an edge `a -> b` means `a` imports from `b`'s package
pub type ModuleGraph = Graph<PathBuf, ImportEdge, Directed>;

pub struct GraphBuilder {
    graph: ModuleGraph,
    node_map: HashMap<PathBuf, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Derive the dependency graph of a module set.
    ///
    /// Nodes are added in insertion order. Each import's package prefix is
    /// compared with the package dir of every other unit; only exact matches
    /// produce edges, so symbol-level and relative imports stay unlinked.
    pub fn from_modules(modules: &ModuleSet) -> ModuleGraph {
        let mut builder = Self::new();
        for unit in modules {
            builder.add_unit(&unit.path);
        }

        let package_dirs: Vec<(&Path, String)> = modules
            .iter()
            .map(|unit| (unit.path.as_path(), unit.package_dir()))
            .collect();

        for unit in modules {
            for target in &unit.imports {
                let Some(prefix) = package_prefix(target) else {
                    continue;
                };
                for (other_path, other_package) in &package_dirs {
                    if other_package == prefix {
                        builder.add_dependency(&unit.path, other_path, target);
                    }
                }
            }
        }

        builder.build()
    }

    pub fn add_unit(&mut self, path: &Path) -> NodeIndex {
        if let Some(&index) = self.node_map.get(path) {
            return index;
        }
        let index = self.graph.add_node(path.to_path_buf());
        self.node_map.insert(path.to_path_buf(), index);
        index
    }

    /// Record that `from` depends on `to`. Self-edges and unknown paths are
    /// ignored; a repeated pair keeps a single edge.
    pub fn add_dependency(&mut self, from: &Path, to: &Path, target: &str) -> Option<EdgeIndex> {
        if from == to {
            return None;
        }
        let source_idx = *self.node_map.get(from)?;
        let target_idx = *self.node_map.get(to)?;
        if let Some(existing) = self.graph.find_edge(source_idx, target_idx) {
            return Some(existing);
        }
        Some(
            self.graph
                .add_edge(source_idx, target_idx, ImportEdge::new(target)),
        )
    }

    pub fn build(self) -> ModuleGraph {
        self.graph
    }

    pub fn get_node_index(&self, path: &Path) -> Option<NodeIndex> {
        self.node_map.get(path).copied()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
