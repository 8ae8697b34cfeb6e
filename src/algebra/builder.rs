use tracing::debug;

use crate::{algebra::RelExpr, parser::{Projection, Query}};

/// Literal translation of a query: joins folded in clause order, the whole
/// `WHERE` as one selection, then the select list.
pub struct AlgebraBuilder;

impl AlgebraBuilder {
    pub fn build(query: &Query) -> RelExpr {
        let mut expr = RelExpr::scan(&query.from);

        for join in query.joins.iter() {
            expr = expr.join(RelExpr::scan(&join.table), join.on.clone());
        }

        if let Some(criteria) = &query.criteria {
            expr = expr.select(vec![criteria.clone()]);
        }

        if let Projection::Attributes(attributes) = &query.select {
            expr = expr.project(attributes.clone());
        }

        debug!(expr = %expr, "built unoptimized algebra");
        expr
    }

    pub fn render(query: &Query) -> String {
        Self::build(query).to_string()
    }
}
