pub mod notation;
pub use notation::*;

pub mod rel_expr;
pub use rel_expr::*;

pub mod builder;
pub use builder::*;
