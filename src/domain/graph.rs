//! Directed node-link model of the hierarchy, used by the HTML renderer.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::record::{ObjectRecord, Scores};

/// Label of the implicit root every top-level record hangs from.
pub const DEFAULT_ROOT_LABEL: &str = "obj";
/// Tooltip of the implicit root node.
pub const ROOT_TITLE: &str = "Root node for all objects";
/// Score key deciding whether a record's scores are printed as numbers.
pub const DEFAULT_PROBE_KEY: &str = "clip_score_scores";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Nodes and `father -> name` edges, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    edge_set: HashSet<GraphEdge>,
}

impl GraphDocument {
    /// Build the graph: one root node, one node per record, one edge per record.
    ///
    /// A father that is not itself a record becomes a bare node without tooltip.
    pub fn from_records(records: &[ObjectRecord], root_label: &str, probe_key: &str) -> Self {
        let mut graph = Self::default();
        graph.upsert_node(root_label, Some(ROOT_TITLE.to_string()));

        for record in records {
            graph.upsert_node(&record.name, Some(tooltip(record, probe_key)));
            graph.ensure_node(&record.father);
            graph.add_edge(&record.father, &record.name);
        }
        graph
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    fn upsert_node(&mut self, id: &str, title: Option<String>) {
        match self.index.get(id) {
            Some(&i) => self.nodes[i].title = title,
            None => {
                self.index.insert(id.to_string(), self.nodes.len());
                self.nodes.push(GraphNode {
                    id: id.to_string(),
                    label: id.to_string(),
                    title,
                });
            }
        }
    }

    fn ensure_node(&mut self, id: &str) {
        if !self.index.contains_key(id) {
            self.upsert_node(id, None);
        }
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        let edge = GraphEdge {
            from: from.to_string(),
            to: to.to_string(),
        };
        if self.edge_set.insert(edge.clone()) {
            self.edges.push(edge);
        }
    }
}

/// A record "has a score" when the probe key holds a non-zero number.
/// A missing or null probe key means no score.
pub fn has_score(scores: &Scores, probe_key: &str) -> bool {
    matches!(scores.get(probe_key), Some(Some(v)) if v != 0.0)
}

/// Node tooltip: definition, then one `key: value` line per score.
pub fn tooltip(record: &ObjectRecord, probe_key: &str) -> String {
    let scored = has_score(&record.scores, probe_key);
    let lines: Vec<String> = record
        .scores
        .iter()
        .map(|(k, v)| match v {
            Some(v) if scored => format!("{}: {:.4}", k, v),
            _ => format!("{}: null", k),
        })
        .collect();
    format!("{}\n\nScores:\n{}", record.definition, lines.join("\n"))
}
