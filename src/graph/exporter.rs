use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::{
    algebra::{Notation, RelExpr},
    graph::{GraphKind, QueryGraph},
    optimizer::{HeuristicOptimizer, OptimizerConfig},
    parser::Query,
};

#[derive(Debug, Clone)]
pub struct QueryGraphs {
    pub literal: QueryGraph,
    pub tuple_reduction: QueryGraph,
    pub attribute_reduction: QueryGraph,
}

impl QueryGraphs {
    pub fn get(&self, kind: GraphKind) -> &QueryGraph {
        match kind {
            GraphKind::Literal => &self.literal,
            GraphKind::TupleReduction => &self.tuple_reduction,
            GraphKind::AttributeReduction => &self.attribute_reduction,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryGraph> {
        GraphKind::ALL.into_iter().map(|kind| self.get(kind))
    }
}

/// Builds the three evaluation-order graphs of a query. Layout and drawing
/// belong to a [`GraphRenderer`](crate::graph::GraphRenderer).
pub struct GraphExporter;

impl GraphExporter {
    pub fn build_graphs(query: &Query) -> QueryGraphs {
        QueryGraphs {
            literal: Self::literal(query),
            tuple_reduction: Self::tuple_reduction(query),
            attribute_reduction: Self::attribute_reduction(query),
        }
    }

    /// `FROM -> JOIN1 -> .. -> JOINn -> WHERE -> SELECT`, join edges labelled
    /// with their `ON` condition.
    pub fn literal(query: &Query) -> QueryGraph {
        let mut graph = QueryGraph::new(GraphKind::Literal);
        let mut last = graph.add_node(format!("FROM: {}", query.from));

        for (i, join) in query.joins.iter().enumerate() {
            let node = graph.add_node(format!("JOIN{}: {}", i + 1, join.table));
            graph.add_edge(last, node, Some(format!("ON {}", join.on.text())));
            last = node;
        }

        if let Some(criteria) = &query.criteria {
            let node = graph.add_node(format!("WHERE: {}", criteria.text()));
            graph.add_edge(last, node, None);
            last = node;
        }

        Self::finish(graph, last, query)
    }

    /// Local selections under each table, left-deep joins, then the
    /// residual selection.
    pub fn tuple_reduction(query: &Query) -> QueryGraph {
        Self::reduction(query, GraphKind::TupleReduction, OptimizerConfig::selections_only())
    }

    /// Per-table projections instead of selections; the `WHERE` stays after
    /// the joins.
    pub fn attribute_reduction(query: &Query) -> QueryGraph {
        Self::reduction(query, GraphKind::AttributeReduction, OptimizerConfig::projections_only())
    }

    fn reduction(query: &Query, kind: GraphKind, config: OptimizerConfig) -> QueryGraph {
        let optimizer = HeuristicOptimizer::new(config);
        let analysis = optimizer.analyze(query);
        let body = optimizer.build_body(query, &analysis);

        let mut graph = QueryGraph::new(kind);
        let top = Self::add_tree(&mut graph, &body);
        Self::finish(graph, top, query)
    }

    /// Inputs first, so sources get the lowest indices.
    fn add_tree(graph: &mut QueryGraph, expr: &RelExpr) -> NodeIndex {
        let inputs: Vec<NodeIndex> = expr.children().into_iter().map(|child| Self::add_tree(graph, child)).collect();
        let node = graph.add_node(expr.label(Notation::Unicode));
        for input in inputs {
            graph.add_edge(input, node, None);
        }
        node
    }

    fn finish(mut graph: QueryGraph, last: NodeIndex, query: &Query) -> QueryGraph {
        let select = graph.add_node(format!("SELECT: {}", query.select));
        graph.add_edge(last, select, None);

        debug!(kind = %graph.kind(), nodes = graph.node_count(), edges = graph.edge_count(), "built query graph");
        graph
    }
}
