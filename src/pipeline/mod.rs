pub mod query_plan;
pub use query_plan::*;

mod _tests;
