use std::{io, path::PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::graph::{QueryGraph, QueryGraphs};

/// Turns a graph into an artifact (a file, an image, a UI widget) and
/// reports where it went. Implementations may be slow and do I/O.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    async fn render(&self, name: &str, graph: &QueryGraph) -> io::Result<PathBuf>;
}

/// Writes Graphviz `.dot` files into one directory.
#[derive(Debug, Clone)]
pub struct DotFileRenderer {
    directory: PathBuf,
}

impl DotFileRenderer {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }
}

#[async_trait]
impl GraphRenderer for DotFileRenderer {
    async fn render(&self, name: &str, graph: &QueryGraph) -> io::Result<PathBuf> {
        let path = self.directory.join(format!("{}.dot", name));
        let dot = graph.to_dot();

        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(&path, dot).await?;

        debug!(path = %path.display(), kind = %graph.kind(), "wrote dot graph");
        Ok(path)
    }
}

/// Writes the JSON form of each graph, for front-ends that lay out graphs
/// themselves.
#[derive(Debug, Clone)]
pub struct JsonFileRenderer {
    directory: PathBuf,
}

impl JsonFileRenderer {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }
}

#[async_trait]
impl GraphRenderer for JsonFileRenderer {
    async fn render(&self, name: &str, graph: &QueryGraph) -> io::Result<PathBuf> {
        let path = self.directory.join(format!("{}.json", name));
        let json = graph.to_json().map_err(io::Error::other)?;

        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(&path, json).await?;

        debug!(path = %path.display(), kind = %graph.kind(), "wrote json graph");
        Ok(path)
    }
}

/// Renders the three graphs as `<prefix>_literal`, `<prefix>_tuple_reduction`
/// and `<prefix>_attribute_reduction`, one after the other.
pub async fn export_graphs<R: GraphRenderer + ?Sized>(
    graphs: &QueryGraphs,
    prefix: &str,
    renderer: &R,
) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(3);
    for graph in graphs.iter() {
        let name = format!("{}_{}", prefix, graph.kind().suffix());
        paths.push(renderer.render(&name, graph).await?);
    }
    Ok(paths)
}
