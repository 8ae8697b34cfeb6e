pub mod parser;
pub use parser::{Condition, ConditionError, ParseError, ParseErrorKind, Projection, Query, TableRef};

pub mod algebra;
pub use algebra::{AlgebraBuilder, Notation, RelExpr};

pub mod optimizer;
pub use optimizer::{HeuristicOptimizer, OptimizerConfig};

pub mod graph;
pub use graph::{
    export_graphs, DotFileRenderer, GraphExporter, GraphKind, GraphRenderer, JsonFileRenderer, QueryGraph, QueryGraphs,
};

pub mod pipeline;
pub use pipeline::QueryPlan;

use parser::condition::ConditionValidator;

/// Whether `expr` is an acceptable `ON`/`WHERE` condition.
pub fn validate(expr: &str) -> bool {
    ConditionValidator::validate(expr)
}

pub fn parse(sql: &str) -> Result<Query, ParseError> {
    Query::try_from(sql)
}

/// Literal relational-algebra translation.
pub fn render(query: &Query) -> String {
    AlgebraBuilder::render(query)
}

/// Relational algebra with selections and projections pushed down.
pub fn optimize(query: &Query) -> String {
    HeuristicOptimizer::default().optimize_to_string(query)
}

pub fn build_graphs(query: &Query) -> QueryGraphs {
    GraphExporter::build_graphs(query)
}
