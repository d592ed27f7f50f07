//! Forest builder: arena trees from the flat `Father` pointers of a table.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::error::DomainError;
use crate::domain::table::{Row, Table};

/// Result type for forest operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs one tree per top-level father.
///
/// A top-level father is a `Father` value that is not the name of any row,
/// typically the implicit `obj` root or a dangling reference.
#[derive(Default)]
pub struct ForestBuilder<'a> {
    relationship_cache: HashMap<&'a str, Vec<&'a Row>>,
    visited: HashSet<&'a str>,
}

impl<'a> ForestBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build_from_table(&mut self, table: &'a Table) -> TreeResult<Vec<TreeArena>> {
        self.relationship_cache.clear();
        self.visited.clear();

        let mut names = HashSet::new();
        for row in table.rows() {
            // first row wins for duplicated names
            if names.insert(row.name.as_str()) {
                self.relationship_cache
                    .entry(row.father.as_str())
                    .or_default()
                    .push(row);
            }
        }

        let tops = self.find_root_nodes(table, &names);
        debug!("found {} top-level fathers", tops.len());

        let mut trees = Vec::new();
        for top in tops {
            trees.push(self.build_tree(top)?);
        }

        // rows never reached from a top sit on a parent cycle
        if let Some(row) = table
            .rows()
            .iter()
            .find(|r| !self.visited.contains(r.name.as_str()))
        {
            return Err(DomainError::CycleDetected(row.name.clone()));
        }

        Ok(trees)
    }

    fn find_root_nodes(&self, table: &'a Table, names: &HashSet<&str>) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        table
            .rows()
            .iter()
            .map(|r| r.father.as_str())
            .filter(|f| !names.contains(f) && seen.insert(*f))
            .collect()
    }

    fn build_tree(&mut self, top: &'a str) -> TreeResult<TreeArena> {
        let mut tree = TreeArena::new();
        let top_idx = tree.insert_node(
            NodeData {
                name: top.to_string(),
                level: None,
            },
            None,
        );

        let mut stack: Vec<(&'a Row, _)> = self
            .relationship_cache
            .get(top)
            .map(|children| children.iter().rev().map(|&c| (c, top_idx)).collect())
            .unwrap_or_default();

        while let Some((row, parent_idx)) = stack.pop() {
            if !self.visited.insert(row.name.as_str()) {
                return Err(DomainError::CycleDetected(row.name.clone()));
            }

            let current_idx = tree.insert_node(
                NodeData {
                    name: row.name.clone(),
                    level: Some(row.level),
                },
                Some(parent_idx),
            );

            if let Some(children) = self.relationship_cache.get(row.name.as_str()) {
                for &child in children.iter().rev() {
                    stack.push((child, current_idx));
                }
            }
        }

        Ok(tree)
    }
}
