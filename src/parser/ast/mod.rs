pub mod text_collector;
pub use text_collector::*;

pub mod projection;
pub use projection::*;

pub mod collection;
pub use collection::*;

pub mod join;
pub use join::*;

pub mod where_parser;
pub use where_parser::*;

pub mod query;
pub use query::*;
