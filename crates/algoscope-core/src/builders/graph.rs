//! Undirected weighted graphs with labelled nodes.
//!
//! Node order and edge order are the input order. Tracers enumerate
//! neighbours in edge insertion order and break distance ties by node
//! input order, so both orders are part of a graph's identity.

use rand::Rng;

use crate::error::{Error, Result};

/// Maximum node count for generated graphs (one letter per node).
pub const MAX_GRAPH_NODES: usize = 26;

/// Label identifying a graph node, e.g. `"A"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeLabel(String);

impl NodeLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeLabel {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl std::fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An undirected edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u32,
}

impl Edge {
    /// The endpoint opposite `node`, if the edge touches it.
    pub fn other(&self, node: usize) -> Option<usize> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

/// An undirected weighted graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<NodeLabel>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed seven-node sample graph. Conventional endpoints are A and G.
    pub fn sample() -> Self {
        let mut graph = Self::new();
        for label in ["A", "B", "C", "D", "E", "F", "G"] {
            graph.nodes.push(NodeLabel::from(label));
        }
        let edges = [
            (0, 1, 4), // A-B
            (0, 3, 2), // A-D
            (1, 2, 3), // B-C
            (1, 4, 1), // B-E
            (2, 5, 6), // C-F
            (2, 6, 2), // C-G
            (3, 4, 5), // D-E
            (4, 5, 3), // E-F
            (5, 6, 1), // F-G
        ];
        graph.edges = edges
            .into_iter()
            .map(|(from, to, weight)| Edge { from, to, weight })
            .collect();
        graph
    }

    /// A connected graph of `size` nodes labelled `A`, `B`, ...
    ///
    /// Every node after the first attaches to a random earlier node, then
    /// roughly `size / 2` extra edges are added. Weights are in 1..=9.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        if !(2..=MAX_GRAPH_NODES).contains(&size) {
            return Err(Error::invalid(format!("graph size must be 2-{MAX_GRAPH_NODES}")));
        }
        let mut graph = Self::new();
        for i in 0..size {
            let letter = char::from(b'A' + i as u8);
            graph.nodes.push(NodeLabel::new(letter.to_string()));
        }
        for to in 1..size {
            let from = rng.gen_range(0..to);
            graph.edges.push(Edge {
                from,
                to,
                weight: rng.gen_range(1..=9),
            });
        }
        for _ in 0..size / 2 {
            let a = rng.gen_range(0..size);
            let b = rng.gen_range(0..size);
            if a != b && !graph.connected(a, b) {
                graph.edges.push(Edge {
                    from: a.min(b),
                    to: a.max(b),
                    weight: rng.gen_range(1..=9),
                });
            }
        }
        Ok(graph)
    }

    /// Add a node. Labels must be non-blank and unique.
    pub fn add_node(&mut self, label: impl Into<String>) -> Result<usize> {
        let label = label.into();
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::invalid("node label must not be blank"));
        }
        if self.index_of(label).is_some() {
            return Err(Error::invalid(format!("node {label} already exists")));
        }
        self.nodes.push(NodeLabel::from(label));
        Ok(self.nodes.len() - 1)
    }

    /// Add an undirected edge between two existing, distinct nodes.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: u32) -> Result<()> {
        let a = self.require(from)?;
        let b = self.require(to)?;
        if a == b {
            return Err(Error::invalid("self-loops are not supported"));
        }
        if weight == 0 {
            return Err(Error::invalid("edge weight must be at least 1"));
        }
        if self.connected(a, b) {
            return Err(Error::invalid(format!("{from} and {to} are already connected")));
        }
        self.edges.push(Edge { from: a, to: b, weight });
        Ok(())
    }

    pub fn nodes(&self) -> &[NodeLabel] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn label(&self, index: usize) -> &NodeLabel {
        &self.nodes[index]
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.as_str() == label)
    }

    /// Resolve a label, rejecting names that are not in the graph.
    pub fn require(&self, label: &str) -> Result<usize> {
        self.index_of(label)
            .ok_or_else(|| Error::invalid(format!("node {label} is not in the graph")))
    }

    /// Neighbours of `node` with edge weights, in edge insertion order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.edges
            .iter()
            .filter_map(move |e| e.other(node).map(|n| (n, e.weight)))
    }

    fn connected(&self, a: usize, b: usize) -> bool {
        self.edges.iter().any(|e| e.other(a) == Some(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sample_graph_matches_reference() {
        let graph = Graph::sample();
        assert_eq!(graph.len(), 7);
        assert_eq!(graph.edges().len(), 9);
        let a = graph.require("A").unwrap();
        let labels: Vec<&str> = graph
            .neighbors(a)
            .map(|(n, _)| graph.label(n).as_str())
            .collect();
        assert_eq!(labels, vec!["B", "D"]);
    }

    #[test]
    fn neighbors_follow_edge_order() {
        let mut graph = Graph::new();
        for label in ["A", "B", "C"] {
            graph.add_node(label).unwrap();
        }
        graph.add_edge("A", "C", 5).unwrap();
        graph.add_edge("A", "B", 1).unwrap();
        let a = graph.require("A").unwrap();
        let order: Vec<(usize, u32)> = graph.neighbors(a).collect();
        assert_eq!(order, vec![(2, 5), (1, 1)]);
    }

    #[test]
    fn rejects_bad_edges() {
        let mut graph = Graph::new();
        graph.add_node("A").unwrap();
        graph.add_node("B").unwrap();
        assert!(graph.add_edge("A", "Z", 1).is_err());
        assert!(graph.add_edge("A", "A", 1).is_err());
        assert!(graph.add_edge("A", "B", 0).is_err());
        graph.add_edge("A", "B", 2).unwrap();
        assert!(graph.add_edge("B", "A", 3).is_err());
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn rejects_duplicate_and_blank_labels() {
        let mut graph = Graph::new();
        graph.add_node("A").unwrap();
        assert!(graph.add_node("A").is_err());
        assert!(graph.add_node("  ").is_err());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn random_graph_is_connected() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = Graph::random(9, &mut rng).unwrap();
        assert_eq!(graph.len(), 9);

        let mut seen = vec![false; graph.len()];
        let mut stack = vec![0];
        while let Some(n) = stack.pop() {
            if std::mem::replace(&mut seen[n], true) {
                continue;
            }
            stack.extend(graph.neighbors(n).map(|(m, _)| m));
        }
        assert!(seen.iter().all(|&s| s));
        assert!(graph.edges().iter().all(|e| (1..=9).contains(&e.weight)));
    }

    #[test]
    fn random_graph_size_is_checked() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Graph::random(1, &mut rng).is_err());
        assert!(Graph::random(MAX_GRAPH_NODES + 1, &mut rng).is_err());
    }
}
