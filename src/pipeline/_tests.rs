#[cfg(test)]
pub mod fixtures {
    use crate::parser::ParseErrorKind;

    pub const VALID_QUERIES: [&str; 5] = [
        "SELECT nome, idade FROM clientes WHERE idade > 25",
        "SELECT * FROM pedidos INNER JOIN clientes ON pedidos.cliente_id = clientes.id",
        "SELECT produto, preco FROM estoque WHERE preco <= 100 AND quantidade > 0",
        "SELECT a.nome, b.data FROM tabela_a a INNER JOIN tabela_b b ON a.id = b.id WHERE a.status = 'ativo'",
        "SELECT p.idPedido, c.Nome FROM Pedido p \
         INNER JOIN Cliente c ON p.Cliente_idCliente = c.idCliente \
         INNER JOIN Status s ON p.Status_idStatus = s.idStatus \
         WHERE c.Nome = 'Joao' AND s.idStatus >= 2",
    ];

    pub const INVALID_QUERIES: [(&str, ParseErrorKind); 7] = [
        ("SELECT * FROM tabela WHERE coluna ~ 'regex'", ParseErrorKind::InvalidWhereCondition),
        ("SELECT * FROM tabela WHERE (coluna1 > 10 OR coluna2 < 5)", ParseErrorKind::InvalidWhereCondition),
        ("DELETE FROM tabela", ParseErrorKind::MalformedQuery),
        ("SELECT * FROM a INNER JOIN b ON a.id = b.id OR a.x = 1", ParseErrorKind::InvalidJoinCondition),
        ("SELECT * FROM a WHERE a.x = 1 WHERE a.y = 2", ParseErrorKind::UnexpectedTrailingInput),
        ("SELECT * FROM a x INNER JOIN b x ON x.id = x.id", ParseErrorKind::DuplicateAlias),
        ("SELECT * FROM a WHERE a.x = 1 AND", ParseErrorKind::InvalidWhereCondition),
    ];
}

#[cfg(test)]
mod tests {
    use super::fixtures::{INVALID_QUERIES, VALID_QUERIES};
    use crate::{
        algebra::Notation,
        graph::DotFileRenderer,
        optimizer::{AttributeUsage, TableCatalog},
        parser::ParseErrorKind,
        pipeline::QueryPlan,
    };

    fn plan(sql: &str) -> QueryPlan {
        QueryPlan::from_sql(sql).expect("Failed to build query plan")
    }

    #[test]
    pub fn test_valid_queries_plan() {
        for sql in VALID_QUERIES {
            let plan = plan(sql);
            assert_eq!(plan.graphs.iter().count(), 3, "{}", sql);
            assert!(plan.graphs.iter().all(|graph| graph.is_acyclic() && graph.sinks().len() == 1), "{}", sql);
        }
    }

    #[test]
    pub fn test_invalid_queries_are_rejected_with_kind() {
        for (sql, kind) in INVALID_QUERIES {
            let err = QueryPlan::from_sql(sql).expect_err("Query should be rejected");
            assert_eq!(err.kind, kind, "{}", sql);
        }
    }

    #[test]
    pub fn test_scenario_single_table() {
        let plan = plan(VALID_QUERIES[0]);

        assert_eq!(plan.query.from.name, "clientes");
        assert_eq!(plan.query.from.alias, "clientes");
        assert!(plan.query.joins.is_empty());
        assert_eq!(plan.optimized.to_string(), "π_{nome, idade}(σ_{idade > 25}(clientes))");
    }

    #[test]
    pub fn test_scenario_wildcard_join() {
        let plan = plan(VALID_QUERIES[1]);
        let optimized = plan.optimized.to_string();

        assert_eq!(optimized, "(pedidos ⨝_{pedidos.cliente_id = clientes.id} clientes)");
        assert!(!optimized.contains('σ'));
        assert!(!optimized.contains('π'));
    }

    #[test]
    pub fn test_scenario_aliased_pushdown() {
        let plan = plan(VALID_QUERIES[3]);

        assert_eq!(
            plan.unoptimized.to_string(),
            "π_{a.nome, b.data}(σ_{a.status = 'ativo'}((ρ_{a}(tabela_a) ⨝_{a.id = b.id} ρ_{b}(tabela_b))))"
        );
        assert!(plan.optimized.to_string().contains("σ_{a.status = 'ativo'}(ρ_{a}(tabela_a))"));
        assert_eq!(
            plan.optimized.output_attributes(),
            Some(&["a.nome".to_string(), "b.data".to_string()][..])
        );
    }

    #[test]
    pub fn test_output_schema_matches_unoptimized() {
        for sql in VALID_QUERIES {
            let plan = plan(sql);
            assert_eq!(plan.optimized.output_attributes(), plan.unoptimized.output_attributes(), "{}", sql);
        }
    }

    #[test]
    pub fn test_join_order_is_preserved() {
        for sql in VALID_QUERIES {
            let plan = plan(sql);
            let original: Vec<_> = plan.query.joins.iter().map(|join| &join.on).collect();
            assert_eq!(plan.optimized.join_conditions(), original, "{}", sql);
        }
    }

    #[test]
    pub fn test_projections_keep_every_referenced_attribute() {
        for sql in VALID_QUERIES {
            let plan = plan(sql);
            let catalog = TableCatalog::from_query(&plan.query);
            let usage = AttributeUsage::collect(&plan.query, &catalog);
            let text = plan.optimized.to_string();

            for table in catalog.tables() {
                if let Some(columns) = usage.projection_for(&table.alias) {
                    let expected = format!("π_{{{}}}", columns.join(", "));
                    assert!(text.contains(&expected), "{} missing {}", sql, expected);
                    assert_eq!(columns, usage.required(&table.alias));
                }
            }
        }
    }

    #[test]
    pub fn test_ascii_rendering() {
        let plan = plan(VALID_QUERIES[2]);

        assert_eq!(
            plan.unoptimized_text(Notation::Ascii),
            "pi_{produto, preco}(sigma_{preco <= 100 AND quantidade > 0}(estoque))"
        );
        assert_eq!(
            plan.optimized_text(Notation::Ascii),
            "pi_{produto, preco}(sigma_{preco <= 100 AND quantidade > 0}(estoque))"
        );
    }

    #[test]
    pub fn test_display_lists_components_and_algebra() {
        let text = plan(VALID_QUERIES[0]).to_string();

        assert!(text.starts_with("SELECT: nome, idade\nFROM: clientes\nWHERE: idade > 25\n"));
        assert!(text.ends_with("Optimized: π_{nome, idade}(σ_{idade > 25}(clientes))"));
    }

    #[tokio::test]
    pub async fn test_export_writes_graphs() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plan = plan(VALID_QUERIES[4]);

        let paths = plan.export("query_temp", &DotFileRenderer::new(dir.path())).await.expect("Failed to export");

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|path| path.exists()));
    }

    #[test]
    pub fn test_rejected_where_reports_cause() {
        let err = QueryPlan::from_sql("SELECT * FROM tabela WHERE coluna ~ 'regex'").expect_err("Query should be rejected");

        assert_eq!(err.kind, ParseErrorKind::InvalidWhereCondition);
        assert!(err.cause.is_some());
        assert!(err.to_string().starts_with("ParseError(InvalidWhereCondition): Invalid WHERE condition"));
    }
}
