//! Subtree resolution over the flat parent-pointer table.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::domain::table::Table;

/// Collect `root` and every transitive child reachable via `Father == Name` edges.
///
/// Breadth-first from `root`. Names already visited are skipped, so cyclic or
/// self-referential parent chains terminate. The root is always part of the
/// result, whether or not a row carries that name.
pub fn resolve(table: &Table, root: &str) -> HashSet<String> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for row in table.rows() {
        children
            .entry(row.father.as_str())
            .or_default()
            .push(row.name.as_str());
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.to_string()) {
            trace!("resolve: skipping visited {}", current);
            continue;
        }
        if let Some(names) = children.get(current) {
            for &name in names {
                if !visited.contains(name) {
                    queue.push_back(name);
                }
            }
        }
    }

    debug!("resolve: root={} yields {} names", root, visited.len());
    visited
}
