use std::fmt;

use crate::{algebra::Notation, parser::{Condition, TableRef}};

/// Relational-algebra expression tree. Leaves are always `Relation`s and
/// joins are binary; trees are built bottom-up and never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum RelExpr {
    Relation(String),
    Rename {
        alias: String,
        input: Box<RelExpr>,
    },
    /// Conjunction of `predicates`, kept in source order.
    Select {
        predicates: Vec<Condition>,
        input: Box<RelExpr>,
    },
    Project {
        attributes: Vec<String>,
        input: Box<RelExpr>,
    },
    Join {
        condition: Condition,
        left: Box<RelExpr>,
        right: Box<RelExpr>,
    },
}

impl RelExpr {
    pub fn relation(name: &str) -> Self {
        RelExpr::Relation(name.to_string())
    }

    /// Base relation, renamed when the reference carries its own alias.
    pub fn scan(table: &TableRef) -> Self {
        let relation = RelExpr::relation(&table.name);
        if table.is_aliased() {
            relation.rename(&table.alias)
        } else {
            relation
        }
    }

    pub fn rename(self, alias: &str) -> Self {
        RelExpr::Rename { alias: alias.to_string(), input: Box::new(self) }
    }

    /// Wraps in a selection; no-op for an empty predicate list.
    pub fn select(self, predicates: Vec<Condition>) -> Self {
        if predicates.is_empty() {
            return self;
        }
        RelExpr::Select { predicates, input: Box::new(self) }
    }

    /// Wraps in a projection; no-op for an empty attribute list.
    pub fn project(self, attributes: Vec<String>) -> Self {
        if attributes.is_empty() {
            return self;
        }
        RelExpr::Project { attributes, input: Box::new(self) }
    }

    pub fn join(self, right: RelExpr, condition: Condition) -> Self {
        RelExpr::Join { condition, left: Box::new(self), right: Box::new(right) }
    }

    pub fn children(&self) -> Vec<&RelExpr> {
        match self {
            RelExpr::Relation(_) => vec![],
            RelExpr::Rename { input, .. }
            | RelExpr::Select { input, .. }
            | RelExpr::Project { input, .. } => vec![input.as_ref()],
            RelExpr::Join { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Join conditions as they read left to right in the rendered text.
    pub fn join_conditions(&self) -> Vec<&Condition> {
        let mut out = vec![];
        self.collect_join_conditions(&mut out);
        out
    }

    fn collect_join_conditions<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            RelExpr::Join { condition, left, right } => {
                left.collect_join_conditions(out);
                out.push(condition);
                right.collect_join_conditions(out);
            },
            _ => {
                for child in self.children() {
                    child.collect_join_conditions(out);
                }
            },
        }
    }

    /// Base relation names, left to right.
    pub fn relations(&self) -> Vec<&str> {
        match self {
            RelExpr::Relation(name) => vec![name.as_str()],
            _ => self.children().into_iter().flat_map(|child| child.relations()).collect(),
        }
    }

    /// Attributes of the outermost projection, if the root is one.
    pub fn output_attributes(&self) -> Option<&[String]> {
        match self {
            RelExpr::Project { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Operator with its parameters but without its inputs, for graph nodes.
    pub fn label(&self, notation: Notation) -> String {
        match self {
            RelExpr::Relation(name) => name.clone(),
            RelExpr::Rename { alias, .. } => format!("{} {}", notation.rename(), alias),
            RelExpr::Select { predicates, .. } => {
                format!("{} {}", notation.select(), render_predicates(predicates, notation))
            },
            RelExpr::Project { attributes, .. } => format!("{} {}", notation.project(), attributes.join(", ")),
            RelExpr::Join { condition, .. } => {
                format!("{} {}", notation.join(), condition.render_with(notation.and()))
            },
        }
    }

    pub fn render(&self, notation: Notation) -> String {
        let mut out = String::new();
        self.render_into(notation, &mut out);
        out
    }

    fn render_into(&self, notation: Notation, out: &mut String) {
        match self {
            RelExpr::Relation(name) => out.push_str(name),
            RelExpr::Rename { alias, input } => {
                out.push_str(&format!("{}_{{{}}}(", notation.rename(), alias));
                input.render_into(notation, out);
                out.push(')');
            },
            RelExpr::Select { predicates, input } => {
                out.push_str(&format!("{}_{{{}}}(", notation.select(), render_predicates(predicates, notation)));
                input.render_into(notation, out);
                out.push(')');
            },
            RelExpr::Project { attributes, input } => {
                out.push_str(&format!("{}_{{{}}}(", notation.project(), attributes.join(", ")));
                input.render_into(notation, out);
                out.push(')');
            },
            RelExpr::Join { condition, left, right } => {
                out.push('(');
                left.render_into(notation, out);
                out.push_str(&format!(" {}_{{{}}} ", notation.join(), condition.render_with(notation.and())));
                right.render_into(notation, out);
                out.push(')');
            },
        }
    }
}

fn render_predicates(predicates: &[Condition], notation: Notation) -> String {
    let separator = format!(" {} ", notation.and());
    predicates
        .iter()
        .map(|predicate| predicate.render_with(notation.and()))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

impl fmt::Display for RelExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Notation::Unicode))
    }
}
