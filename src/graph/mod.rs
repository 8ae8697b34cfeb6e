pub mod query_graph;
pub use query_graph::*;

pub mod exporter;
pub use exporter::*;

pub mod renderer;
pub use renderer::*;
