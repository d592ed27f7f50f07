//! Interactive HTML rendering of the hierarchy graph.
//!
//! The document is assembled in memory; writing it to disk is a separate step.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::GraphDocument;
use crate::infrastructure::traits::FileSystem;

/// Default name of the rendered document.
pub const DEFAULT_GRAPH_FILE: &str = "interactive_tree.html";

const VIS_NETWORK_JS: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// Presentation settings of the rendered network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    pub height: String,
    pub width: String,
    pub directed: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            height: "750px".to_string(),
            width: "100%".to_string(),
            directed: true,
        }
    }
}

#[derive(Serialize)]
struct NetworkData<'a> {
    nodes: &'a [crate::domain::GraphNode],
    edges: Vec<EdgeData<'a>>,
}

#[derive(Serialize)]
struct EdgeData<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    arrows: Option<&'static str>,
}

/// Render a standalone HTML document embedding the graph as JSON.
pub fn render_html(graph: &GraphDocument, options: &GraphOptions) -> ApplicationResult<String> {
    let data = NetworkData {
        nodes: &graph.nodes,
        edges: graph
            .edges
            .iter()
            .map(|e| EdgeData {
                from: &e.from,
                to: &e.to,
                arrows: options.directed.then_some("to"),
            })
            .collect(),
    };
    let json = serde_json::to_string(&data).map_err(|e| ApplicationError::OperationFailed {
        context: "serialize graph".to_string(),
        source: Box::new(e),
    })?;
    // keep embedded titles from closing the script element
    let json = json.replace("</", "<\\/");

    debug!(
        "render: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Object hierarchy</title>
    <script src="{js}"></script>
    <style>
        #network {{
            width: {width};
            height: {height};
            border: 1px solid lightgray;
        }}
        div.vis-tooltip {{ white-space: pre-wrap; }}
    </style>
</head>
<body>
    <div id="network"></div>
    <script>
        var data = {json};
        var container = document.getElementById("network");
        var network = new vis.Network(
            container,
            {{ nodes: new vis.DataSet(data.nodes), edges: new vis.DataSet(data.edges) }},
            {{ physics: {{ stabilization: true }}, interaction: {{ hover: true }} }}
        );
    </script>
</body>
</html>
"#,
        js = VIS_NETWORK_JS,
        width = options.width,
        height = options.height,
        json = json,
    ))
}

/// Service writing rendered graphs through the filesystem seam.
pub struct GraphService {
    fs: Arc<dyn FileSystem>,
}

impl GraphService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn write(
        &self,
        graph: &GraphDocument,
        options: &GraphOptions,
        path: &Path,
    ) -> ApplicationResult<()> {
        let html = render_html(graph, options)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent of", path)?;
        self.fs
            .write(path, &html)
            .with_path_context("write graph", path)
    }
}
