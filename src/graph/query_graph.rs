use std::fmt;

use petgraph::{
    algo::is_cyclic_directed,
    dot::Dot,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
    Direction,
};
use serde::{Deserialize, Serialize};

/// Which evaluation order a graph depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// Clauses chained in source order.
    Literal,
    /// Selections pushed onto their tables.
    TupleReduction,
    /// Projections pushed onto their tables.
    AttributeReduction,
}

impl GraphKind {
    pub const ALL: [GraphKind; 3] = [GraphKind::Literal, GraphKind::TupleReduction, GraphKind::AttributeReduction];

    /// File-name suffix for exported graphs.
    pub fn suffix(&self) -> &'static str {
        match self {
            GraphKind::Literal => "literal",
            GraphKind::TupleReduction => "tuple_reduction",
            GraphKind::AttributeReduction => "attribute_reduction",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub label: String,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphEdge {
    pub label: Option<String>,
}

impl fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label.as_deref().unwrap_or_default())
    }
}

/// Directed graph of labelled steps; edges point from an input to the step
/// consuming it. Nodes are keyed by index, so equal labels never merge.
#[derive(Debug, Clone)]
pub struct QueryGraph {
    kind: GraphKind,
    graph: DiGraph<GraphNode, GraphEdge>,
}

impl QueryGraph {
    pub fn new(kind: GraphKind) -> Self {
        Self { kind, graph: DiGraph::new() }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn add_node(&mut self, label: impl Into<String>) -> NodeIndex {
        self.graph.add_node(GraphNode { label: label.into() })
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, label: Option<String>) {
        self.graph.add_edge(from, to, GraphEdge { label });
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.graph.node_indices().map(|index| self.graph[index].label.as_str()).collect()
    }

    /// `(from, to, label)` triples in insertion order.
    pub fn edges(&self) -> Vec<(&str, &str, Option<&str>)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].label.as_str(),
                    self.graph[edge.target()].label.as_str(),
                    edge.weight().label.as_deref(),
                )
            })
            .collect()
    }

    /// Nodes nothing consumes; a well-formed query graph has exactly one.
    pub fn sinks(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|index| self.graph.neighbors_directed(*index, Direction::Outgoing).next().is_none())
            .map(|index| self.graph[index].label.as_str())
            .collect()
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    pub fn inner(&self) -> &DiGraph<GraphNode, GraphEdge> {
        &self.graph
    }

    /// Graphviz source.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Serialize)]
struct JsonGraph<'a> {
    kind: GraphKind,
    nodes: Vec<&'a str>,
    edges: Vec<JsonEdge<'a>>,
}

#[derive(Serialize)]
struct JsonEdge<'a> {
    from: usize,
    to: usize,
    label: Option<&'a str>,
}

impl Serialize for QueryGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let edges = self
            .graph
            .edge_references()
            .map(|edge| JsonEdge {
                from: edge.source().index(),
                to: edge.target().index(),
                label: edge.weight().label.as_deref(),
            })
            .collect();

        JsonGraph { kind: self.kind, nodes: self.labels(), edges }.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::graph::{GraphKind, QueryGraph};

    fn chain() -> QueryGraph {
        let mut graph = QueryGraph::new(GraphKind::Literal);
        let from = graph.add_node("FROM: t");
        let join = graph.add_node("JOIN1: u");
        let select = graph.add_node("SELECT: *");
        graph.add_edge(from, join, Some("ON t.id = u.id".into()));
        graph.add_edge(join, select, None);
        graph
    }

    #[test]
    pub fn test_graph_accessors() {
        let graph = chain();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.labels(), vec!["FROM: t", "JOIN1: u", "SELECT: *"]);
        assert_eq!(graph.edges()[0], ("FROM: t", "JOIN1: u", Some("ON t.id = u.id")));
        assert_eq!(graph.sinks(), vec!["SELECT: *"]);
        assert!(graph.is_acyclic());
    }

    #[test]
    pub fn test_equal_labels_stay_distinct() {
        let mut graph = QueryGraph::new(GraphKind::TupleReduction);
        graph.add_node("emp");
        graph.add_node("emp");

        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    pub fn test_dot_output() {
        let dot = chain().to_dot();

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"JOIN1: u\""));
        assert!(dot.contains("label = \"ON t.id = u.id\""));
    }

    #[test]
    pub fn test_json_output() {
        let json: Value = serde_json::from_str(&chain().to_json().expect("Failed to serialize graph"))
            .expect("Failed to read graph json");

        assert_eq!(
            json,
            json!({
                "kind": "literal",
                "nodes": ["FROM: t", "JOIN1: u", "SELECT: *"],
                "edges": [
                    { "from": 0, "to": 1, "label": "ON t.id = u.id" },
                    { "from": 1, "to": 2, "label": null }
                ]
            })
        );
    }
}
