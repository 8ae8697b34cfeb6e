use tracing::debug;

use crate::{
    algebra::RelExpr,
    optimizer::{AttributeUsage, OptimizerConfig, PredicatePartition, TableCatalog},
    parser::{Projection, Query, TableRef},
};

/// Result of the analysis stages, shared by the rewrite stages.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnalysis {
    pub catalog: TableCatalog,
    pub usage: AttributeUsage,
    pub partition: PredicatePartition,
}

/// Rule-based rewrite: selections and projections pushed to the tables,
/// joins kept in their original order.
///
/// Stages, each callable on its own:
/// 1. [`analyze`](Self::analyze): tables, attribute usage, predicate partition
/// 2. [`table_subtree`](Self::table_subtree): per-table rename/select/project
/// 3. [`assemble_joins`](Self::assemble_joins): left-deep fold in join order
/// 4. [`apply_deferred`](Self::apply_deferred): multi-table and unattributed predicates
/// 5. [`apply_final_projection`](Self::apply_final_projection): original select list
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicOptimizer {
    config: OptimizerConfig,
}

impl HeuristicOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> OptimizerConfig {
        self.config
    }

    pub fn analyze(&self, query: &Query) -> QueryAnalysis {
        let catalog = TableCatalog::from_query(query);
        let usage = AttributeUsage::collect(query, &catalog);
        let partition = PredicatePartition::classify(query.criteria.as_ref(), &catalog);

        debug!(
            tables = catalog.len(),
            pruning_safe = usage.is_pruning_safe(),
            predicates = partition.predicates.len(),
            deferred = partition.deferred().len(),
            "analyzed query"
        );
        QueryAnalysis { catalog, usage, partition }
    }

    pub fn table_subtree(&self, table: &TableRef, analysis: &QueryAnalysis) -> RelExpr {
        let mut expr = RelExpr::scan(table);

        if self.config.selection_pushdown {
            expr = expr.select(analysis.partition.local_for(&table.alias));
        }

        if self.config.projection_pushdown {
            if let Some(columns) = analysis.usage.projection_for(&table.alias) {
                expr = expr.project(columns);
            }
        }

        expr
    }

    pub fn assemble_joins(&self, query: &Query, analysis: &QueryAnalysis) -> RelExpr {
        let mut expr = self.table_subtree(&query.from, analysis);

        for join in query.joins.iter() {
            let right = self.table_subtree(&join.table, analysis);
            expr = expr.join(right, join.on.clone());
        }

        debug!(joins = query.joins.len(), "assembled joins");
        expr
    }

    pub fn apply_deferred(&self, expr: RelExpr, analysis: &QueryAnalysis) -> RelExpr {
        let predicates = if self.config.selection_pushdown {
            analysis.partition.deferred()
        } else {
            analysis.partition.all()
        };

        debug!(predicates = predicates.len(), "applied deferred selection");
        expr.select(predicates)
    }

    pub fn apply_final_projection(&self, expr: RelExpr, query: &Query) -> RelExpr {
        match &query.select {
            Projection::Wildcard => expr,
            Projection::Attributes(attributes) => expr.project(attributes.clone()),
        }
    }

    /// Every stage except the final projection.
    pub fn build_body(&self, query: &Query, analysis: &QueryAnalysis) -> RelExpr {
        let joined = self.assemble_joins(query, analysis);
        self.apply_deferred(joined, analysis)
    }

    pub fn optimize(&self, query: &Query) -> RelExpr {
        let analysis = self.analyze(query);
        let body = self.build_body(query, &analysis);
        let expr = self.apply_final_projection(body, query);

        debug!(config = ?self.config, expr = %expr, "optimized algebra");
        expr
    }

    pub fn optimize_to_string(&self, query: &Query) -> String {
        self.optimize(query).to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        algebra::AlgebraBuilder,
        optimizer::{HeuristicOptimizer, OptimizerConfig},
        parser::Query,
    };

    fn query(sql: &str) -> Query {
        Query::try_from(sql).expect("Failed to parse query")
    }

    fn optimize(sql: &str) -> String {
        HeuristicOptimizer::default().optimize_to_string(&query(sql))
    }

    #[test]
    pub fn test_single_table_selection() {
        assert_eq!(
            optimize("SELECT nome, idade FROM clientes WHERE idade > 25"),
            "π_{nome, idade}(σ_{idade > 25}(clientes))"
        );
    }

    #[test]
    pub fn test_wildcard_join_untouched() {
        let expr = HeuristicOptimizer::default()
            .optimize(&query("SELECT * FROM pedidos INNER JOIN clientes ON pedidos.cliente_id = clientes.id"));

        assert_eq!(expr.to_string(), "(pedidos ⨝_{pedidos.cliente_id = clientes.id} clientes)");
        assert_eq!(expr.output_attributes(), None);
        assert_eq!(expr.join_conditions().len(), 1);
    }

    #[test]
    pub fn test_selection_and_projection_pushdown() {
        assert_eq!(
            optimize("SELECT a.nome, b.data FROM tabela_a a INNER JOIN tabela_b b ON a.id = b.id WHERE a.status = 'ativo'"),
            "π_{a.nome, b.data}((π_{a.id, a.nome, a.status}(σ_{a.status = 'ativo'}(ρ_{a}(tabela_a))) ⨝_{a.id = b.id} π_{b.data, b.id}(ρ_{b}(tabela_b))))"
        );
    }

    #[test]
    pub fn test_many_joins_with_residual() {
        let sql = "SELECT p.idPedido, c.Nome FROM Pedido p \
                   INNER JOIN Cliente c ON p.Cliente_idCliente = c.idCliente \
                   INNER JOIN Status s ON p.Status_idStatus = s.idStatus \
                   WHERE c.Nome = 'Joao' AND s.idStatus >= 2 AND p.total > c.limite";

        assert_eq!(
            optimize(sql),
            "π_{p.idPedido, c.Nome}(σ_{p.total > c.limite}(((\
             π_{p.Cliente_idCliente, p.Status_idStatus, p.idPedido, p.total}(ρ_{p}(Pedido)) \
             ⨝_{p.Cliente_idCliente = c.idCliente} \
             π_{c.Nome, c.idCliente, c.limite}(σ_{c.Nome = 'Joao'}(ρ_{c}(Cliente)))) \
             ⨝_{p.Status_idStatus = s.idStatus} \
             π_{s.idStatus}(σ_{s.idStatus >= 2}(ρ_{s}(Status))))))"
        );
    }

    #[test]
    pub fn test_unqualified_predicate_kept_after_joins() {
        assert_eq!(
            optimize("SELECT a.x FROM t a INNER JOIN u b ON a.id = b.id WHERE ativo = 1 AND a.x > 2"),
            "π_{a.x}(σ_{ativo = 1}((σ_{a.x > 2}(ρ_{a}(t)) ⨝_{a.id = b.id} ρ_{b}(u))))"
        );
    }

    #[test]
    pub fn test_selections_only() {
        let optimizer = HeuristicOptimizer::new(OptimizerConfig::selections_only());

        assert_eq!(
            optimizer.optimize_to_string(&query(
                "SELECT a.nome FROM tabela_a a INNER JOIN tabela_b b ON a.id = b.id WHERE a.status = 'ativo' AND b.k < a.k"
            )),
            "π_{a.nome}(σ_{b.k < a.k}((σ_{a.status = 'ativo'}(ρ_{a}(tabela_a)) ⨝_{a.id = b.id} ρ_{b}(tabela_b))))"
        );
    }

    #[test]
    pub fn test_projections_only_keeps_where_after_joins() {
        let optimizer = HeuristicOptimizer::new(OptimizerConfig::projections_only());

        assert_eq!(
            optimizer.optimize_to_string(&query(
                "SELECT a.nome FROM tabela_a a INNER JOIN tabela_b b ON a.id = b.id WHERE a.status = 'ativo' AND b.k < a.k"
            )),
            "π_{a.nome}(σ_{a.status = 'ativo' ∧ b.k < a.k}((π_{a.id, a.k, a.nome, a.status}(ρ_{a}(tabela_a)) ⨝_{a.id = b.id} π_{b.id, b.k}(ρ_{b}(tabela_b)))))"
        );
    }

    #[test]
    pub fn test_disabled_matches_literal_translation() {
        let sql = "SELECT a.nome, b.data FROM tabela_a a INNER JOIN tabela_b b ON a.id = b.id WHERE a.status = 'ativo' AND b.x = 1";
        let query = query(sql);

        assert_eq!(
            HeuristicOptimizer::new(OptimizerConfig::disabled()).optimize_to_string(&query),
            AlgebraBuilder::render(&query)
        );
    }

    #[test]
    pub fn test_stages_are_independent() {
        let query = query("SELECT a.nome FROM tabela_a a INNER JOIN tabela_b b ON a.id = b.id WHERE a.s = 1 AND b.t = a.t");
        let optimizer = HeuristicOptimizer::default();
        let analysis = optimizer.analyze(&query);

        assert_eq!(
            optimizer.table_subtree(&query.joins[0].table, &analysis).to_string(),
            "π_{b.id, b.t}(ρ_{b}(tabela_b))"
        );
        assert_eq!(analysis.partition.deferred().len(), 1);

        let body = optimizer.build_body(&query, &analysis);
        assert!(body.to_string().starts_with("σ_{b.t = a.t}("));
        assert_eq!(body.output_attributes(), None);
    }
}
