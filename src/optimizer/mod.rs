pub mod config;
pub use config::*;

pub mod catalog;
pub use catalog::*;

pub mod attributes;
pub use attributes::*;

pub mod predicates;
pub use predicates::*;

pub mod heuristic_optimizer;
pub use heuristic_optimizer::*;
