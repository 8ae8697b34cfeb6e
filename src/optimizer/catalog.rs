use indexmap::IndexMap;

use crate::parser::{Query, TableRef};

/// Tables of one query keyed by alias, in `FROM`-then-join order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCatalog {
    tables: IndexMap<String, TableRef>,
}

impl TableCatalog {
    pub fn from_query(query: &Query) -> Self {
        let tables = query
            .tables()
            .into_iter()
            .map(|table| (table.alias.clone(), table.clone()))
            .collect();
        Self { tables }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableRef> {
        self.tables.values()
    }

    pub fn name_of(&self, alias: &str) -> Option<&str> {
        self.tables.get(alias).map(|table| table.name.as_str())
    }

    /// The alias of a single-table query.
    pub fn sole_alias(&self) -> Option<&str> {
        match self.tables.len() {
            1 => self.tables.keys().next().map(String::as_str),
            _ => None,
        }
    }

    /// Alias a column qualifier stands for. Aliases win; a real table name
    /// resolves only when exactly one reference uses that table.
    pub fn resolve(&self, qualifier: &str) -> Option<&str> {
        if let Some(alias) = self.tables.keys().find(|alias| alias.eq_ignore_ascii_case(qualifier)) {
            return Some(alias.as_str());
        }

        let mut by_name = self
            .tables
            .values()
            .filter(|table| table.name.eq_ignore_ascii_case(qualifier));

        match (by_name.next(), by_name.next()) {
            (Some(table), None) => Some(table.alias.as_str()),
            _ => None,
        }
    }
}
