/// Which rewrites the heuristic optimizer applies.
///
/// - `selection_pushdown` moves single-table `WHERE` conjuncts onto their table.
/// - `projection_pushdown` prunes every table to the columns the query uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerConfig {
    pub selection_pushdown: bool,
    pub projection_pushdown: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both rewrites.
    pub fn full() -> Self {
        Self { selection_pushdown: true, projection_pushdown: true }
    }

    /// Early selection only (tuple reduction).
    pub fn selections_only() -> Self {
        Self { selection_pushdown: true, projection_pushdown: false }
    }

    /// Early projection only (attribute reduction).
    pub fn projections_only() -> Self {
        Self { selection_pushdown: false, projection_pushdown: true }
    }

    /// No rewrite; the result matches the literal translation.
    pub fn disabled() -> Self {
        Self { selection_pushdown: false, projection_pushdown: false }
    }
}
