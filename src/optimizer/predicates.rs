use indexmap::IndexSet;
use tracing::{trace, warn};

use crate::{optimizer::TableCatalog, parser::Condition};

/// Where a `WHERE` conjunct can be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateScope {
    /// Reads one table only; pushed onto that table.
    Local(String),
    /// Reads several tables; applied after every join.
    Residual(Vec<String>),
    /// Cannot be pinned to tables (bare column or unknown qualifier);
    /// kept after every join as well.
    Unattributed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPredicate {
    pub predicate: Condition,
    pub scope: PredicateScope,
}

/// `WHERE` split into atomic predicates, each tagged with its scope, in
/// source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicatePartition {
    pub predicates: Vec<ClassifiedPredicate>,
}

impl PredicatePartition {
    pub fn classify(criteria: Option<&Condition>, catalog: &TableCatalog) -> Self {
        let predicates = criteria
            .map(|criteria| criteria.conjuncts())
            .unwrap_or_default()
            .into_iter()
            .map(|predicate| {
                let scope = scope_of(&predicate, catalog);
                trace!(predicate = %predicate, scope = ?scope, "classified predicate");
                if scope == PredicateScope::Unattributed {
                    warn!(predicate = %predicate, "predicate not attributable to a table, keeping it after the joins");
                }
                ClassifiedPredicate { predicate, scope }
            })
            .collect();

        Self { predicates }
    }

    pub fn local_for(&self, alias: &str) -> Vec<Condition> {
        self.predicates
            .iter()
            .filter(|classified| matches!(&classified.scope, PredicateScope::Local(owner) if owner == alias))
            .map(|classified| classified.predicate.clone())
            .collect()
    }

    /// Residual and unattributed predicates.
    pub fn deferred(&self) -> Vec<Condition> {
        self.predicates
            .iter()
            .filter(|classified| !matches!(classified.scope, PredicateScope::Local(_)))
            .map(|classified| classified.predicate.clone())
            .collect()
    }

    pub fn all(&self) -> Vec<Condition> {
        self.predicates.iter().map(|classified| classified.predicate.clone()).collect()
    }
}

fn scope_of(predicate: &Condition, catalog: &TableCatalog) -> PredicateScope {
    if let Some(alias) = catalog.sole_alias() {
        return PredicateScope::Local(alias.to_string());
    }

    let mut aliases: IndexSet<String> = IndexSet::new();
    for reference in predicate.references() {
        let resolved = reference.qualifier.as_deref().and_then(|qualifier| catalog.resolve(qualifier));
        match resolved {
            Some(alias) => {
                aliases.insert(alias.to_string());
            },
            None => return PredicateScope::Unattributed,
        }
    }

    match aliases.len() {
        0 => PredicateScope::Unattributed,
        1 => PredicateScope::Local(aliases.swap_remove_index(0).unwrap_or_default()),
        _ => PredicateScope::Residual(aliases.into_iter().collect()),
    }
}
