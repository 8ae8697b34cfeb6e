/// Clause the parser is currently positioned on.
///
/// Phases only move forward: a query is `SELECT ... FROM ...`, then any
/// number of `INNER JOIN ... ON ...`, then an optional `WHERE ...`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    #[default]
    Projection = 0,
    Collections = 1,
    Joins = 2,
    Criteria = 3,
    EOF = 4,
}
