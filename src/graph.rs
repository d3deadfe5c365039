//! Dependency-graph distance metrics
//!
//! Each sentence becomes a directed graph: a synthetic ROOT plus one vertex
//! per token, with an edge head → dependent for every non-punctuation token.
//! Punctuation is left out because parsers often hang unrelated material off
//! it. Vertices with no edges are never materialised. Metrics are only
//! reported for graphs that form a single weakly connected component.

use crate::tree::SentenceTree;
use petgraph::Undirected;
use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};

/// Outcome of building a sentence graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    Connected,
    /// More than one weakly connected component
    Disconnected(usize),
    /// Duplicate ids, self-loops or heads outside the sentence
    Degenerate,
}

/// Sentence dependency graph rooted at a synthetic ROOT vertex
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<usize, ()>,
    root: NodeIndex,
    vertices: FxHashMap<usize, NodeIndex>,
    state: GraphState,
}

impl DependencyGraph {
    pub fn build(tree: &SentenceTree) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(0);
        let mut vertices = FxHashMap::default();
        vertices.insert(0, root);

        let mut ids = FxHashSet::default();
        let mut degenerate = false;
        for token in tree {
            degenerate |= !ids.insert(token.id) || token.head == token.id;
        }
        degenerate |= tree
            .iter()
            .any(|t| t.head != 0 && !ids.contains(&t.head));

        if !degenerate {
            for token in tree.iter().filter(|t| !t.is_punct()) {
                let head = *vertices
                    .entry(token.head)
                    .or_insert_with(|| graph.add_node(token.head));
                let dependent = *vertices
                    .entry(token.id)
                    .or_insert_with(|| graph.add_node(token.id));
                graph.add_edge(head, dependent, ());
            }
        }

        let state = if degenerate {
            GraphState::Degenerate
        } else {
            match connected_components(&graph) {
                1 => GraphState::Connected,
                n => GraphState::Disconnected(n),
            }
        };

        Self {
            graph,
            root,
            vertices,
            state,
        }
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Mean undirected ROOT distance over non-punct, non-root tokens
    ///
    /// `None` unless the graph is connected and at least one token is
    /// reachable.
    pub fn mean_hierarchical_distance(&self, tree: &SentenceTree) -> Option<f64> {
        if self.state != GraphState::Connected {
            return None;
        }
        let undirected = self.graph.clone().into_edge_type::<Undirected>();
        let distances = dijkstra(&undirected, self.root, None, |_| 1usize);

        let measured: Vec<usize> = tree
            .iter()
            .filter(|t| !t.is_punct() && t.rel != "root")
            .filter_map(|t| self.vertices.get(&t.id))
            .filter_map(|vertex| distances.get(vertex).copied())
            .collect();
        mean(&measured)
    }
}

/// Mean count of intervening non-punct tokens between each token and its head
///
/// Positions are counted in the sentence with punctuation removed. Root
/// dependents and tokens whose head is not in the filtered sequence are
/// skipped. `None` with fewer than two non-punct tokens.
pub fn mean_dependency_distance(tree: &SentenceTree) -> Option<f64> {
    let words: Vec<_> = tree.iter().filter(|t| !t.is_punct()).collect();
    if words.len() < 2 {
        return None;
    }
    let positions: FxHashMap<usize, usize> =
        words.iter().enumerate().map(|(pos, t)| (t.id, pos)).collect();

    let distances: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_root() && t.head != t.id)
        .filter_map(|(pos, t)| {
            let head_pos = *positions.get(&t.head)?;
            pos.abs_diff(head_pos).checked_sub(1)
        })
        .collect();
    mean(&distances)
}

/// Graph metrics for one sentence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceMetrics {
    pub state: GraphState,
    pub mhd: Option<f64>,
    /// Only kept when `mhd` is defined
    pub mdd: Option<f64>,
}

impl SentenceMetrics {
    pub fn compute(tree: &SentenceTree) -> Self {
        let graph = DependencyGraph::build(tree);
        let mhd = graph.mean_hierarchical_distance(tree);
        let mdd = mhd.and_then(|_| mean_dependency_distance(tree));
        Self {
            state: graph.state(),
            mhd,
            mdd,
        }
    }
}

fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
    }
}
