use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{
    optimizer::TableCatalog,
    parser::{condition::{AttributeRef, ConditionLexer, TokenKind}, Projection, Query},
};

static QUALIFIED_WILDCARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^\W\d]\w*)\.\*$").expect("qualified wildcard pattern is valid")
});

/// Qualified columns each table must keep, and the tables that cannot be
/// pruned at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeUsage {
    required: IndexMap<String, BTreeSet<String>>,
    whole_tables: HashSet<String>,
    /// Set when some reference cannot be pinned to one table: a bare column,
    /// an unknown qualifier, `*` or a select item outside the grammar.
    blocked: bool,
}

impl AttributeUsage {
    pub fn collect(query: &Query, catalog: &TableCatalog) -> Self {
        let mut usage = AttributeUsage::default();

        match &query.select {
            Projection::Wildcard => usage.blocked = true,
            Projection::Attributes(items) => {
                for item in items {
                    usage.add_select_item(item, catalog);
                }
            },
        }

        let conditions = query
            .joins
            .iter()
            .map(|join| &join.on)
            .chain(query.criteria.iter());
        for condition in conditions {
            for reference in condition.references() {
                usage.add_reference(&reference, catalog);
            }
        }

        debug!(blocked = usage.blocked, tables = usage.required.len(), "collected attribute usage");
        usage
    }

    fn add_select_item(&mut self, item: &str, catalog: &TableCatalog) {
        if let Some(captures) = QUALIFIED_WILDCARD.captures(item) {
            match captures.get(1).and_then(|qualifier| catalog.resolve(qualifier.as_str())) {
                Some(alias) => {
                    self.whole_tables.insert(alias.to_string());
                },
                None => self.blocked = true,
            }
            return;
        }

        let Ok(tokens) = ConditionLexer::tokenize(item) else {
            self.blocked = true;
            return;
        };

        for token in tokens {
            if let TokenKind::Identifier { qualifier, name } = token.kind {
                self.add_reference(&AttributeRef { qualifier, column: name }, catalog);
            }
        }
    }

    fn add_reference(&mut self, reference: &AttributeRef, catalog: &TableCatalog) {
        let alias = reference.qualifier.as_deref().and_then(|qualifier| catalog.resolve(qualifier));
        match alias {
            Some(alias) => {
                self.required
                    .entry(alias.to_string())
                    .or_default()
                    .insert(format!("{}.{}", alias, reference.column));
            },
            None => self.blocked = true,
        }
    }

    /// Whether any table may be pruned at all.
    pub fn is_pruning_safe(&self) -> bool {
        !self.blocked
    }

    /// Sorted columns to keep for `alias`, or `None` when that table must
    /// pass through unpruned.
    pub fn projection_for(&self, alias: &str) -> Option<Vec<String>> {
        if self.blocked || self.whole_tables.contains(alias) {
            return None;
        }

        self.required
            .get(alias)
            .filter(|columns| !columns.is_empty())
            .map(|columns| columns.iter().cloned().collect())
    }

    pub fn required(&self, alias: &str) -> Vec<String> {
        self.required
            .get(alias)
            .map(|columns| columns.iter().cloned().collect())
            .unwrap_or_default()
    }
}
