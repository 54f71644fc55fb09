use petgraph::algo::toposort;
use std::path::PathBuf;
use tracing::warn;

use super::graph::ModuleGraph;

/// Emission order for a module graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linearization {
    /// Every unit path, dependencies before dependents
    pub order: Vec<PathBuf>,
    /// Set when the graph had a cycle and `order` is plain insertion order
    pub cycle_detected: bool,
}

/// Order the graph so that for every edge `a -> b`, `b` comes before `a`.
///
/// A cycle makes that impossible. The whole graph then falls back to node
/// insertion order (scan order); no partial ordering is attempted.
pub fn linearize(graph: &ModuleGraph) -> Linearization {
    match toposort(graph, None) {
        Ok(sorted) => Linearization {
            // toposort puts importers first
            order: sorted
                .into_iter()
                .rev()
                .map(|idx| graph[idx].clone())
                .collect(),
            cycle_detected: false,
        },
        Err(cycle) => {
            warn!(
                unit = %graph[cycle.node_id()].display(),
                "circular dependencies detected, using scan order"
            );
            Linearization {
                order: graph.node_indices().map(|idx| graph[idx].clone()).collect(),
                cycle_detected: true,
            }
        }
    }
}
