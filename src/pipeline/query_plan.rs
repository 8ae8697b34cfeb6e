use std::{fmt, io, path::PathBuf};

use tracing::debug;

use crate::{
    algebra::{AlgebraBuilder, Notation, RelExpr},
    graph::{export_graphs, GraphExporter, GraphRenderer, QueryGraphs},
    optimizer::{HeuristicOptimizer, OptimizerConfig},
    parser::{ParseError, Query},
};

/// Everything derived from one query string: the parsed model, the literal
/// and optimized algebra, and the three evaluation-order graphs.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub query: Query,
    pub unoptimized: RelExpr,
    pub optimized: RelExpr,
    pub graphs: QueryGraphs,
}

impl QueryPlan {
    pub fn from_sql(sql: &str) -> Result<Self, ParseError> {
        Self::with_config(sql, OptimizerConfig::default())
    }

    pub fn with_config(sql: &str, config: OptimizerConfig) -> Result<Self, ParseError> {
        let query = Query::try_from(sql)
            .inspect_err(|err| debug!(kind = %err.kind, message = %err.message, "rejected query"))?;
        Ok(Self::from_query(query, config))
    }

    pub fn from_query(query: Query, config: OptimizerConfig) -> Self {
        let unoptimized = AlgebraBuilder::build(&query);
        let optimized = HeuristicOptimizer::new(config).optimize(&query);
        let graphs = GraphExporter::build_graphs(&query);

        Self { query, unoptimized, optimized, graphs }
    }

    pub fn unoptimized_text(&self, notation: Notation) -> String {
        self.unoptimized.render(notation)
    }

    pub fn optimized_text(&self, notation: Notation) -> String {
        self.optimized.render(notation)
    }

    pub async fn export<R: GraphRenderer + ?Sized>(&self, prefix: &str, renderer: &R) -> io::Result<Vec<PathBuf>> {
        export_graphs(&self.graphs, prefix, renderer).await
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.query)?;
        writeln!(f, "Original: {}", self.unoptimized)?;
        write!(f, "Optimized: {}", self.optimized)
    }
}
