pub mod query_parser;
pub use query_parser::*;

pub mod ast;
pub use ast::*;

pub mod condition;

pub mod parse_error;
pub use parse_error::*;

pub mod phase;
pub use phase::*;

pub mod word_comparer;
pub use word_comparer::*;

pub mod query_comparers;
pub use query_comparers::*;

pub use condition::{Condition, ConditionError};
