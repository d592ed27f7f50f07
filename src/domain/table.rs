//! Tabular projection of records: one row per record, scores as columns.

use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use crate::domain::record::ObjectRecord;

/// Fixed leading columns of every table.
pub const BASE_COLUMNS: [&str; 5] = ["Name", "Father", "Definition", "Total Descendants", "Level"];

/// One projected record.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    pub father: String,
    pub definition: String,
    pub total_descendants: u64,
    pub level: u32,
    /// Sparse score cells: a key missing here is an empty cell.
    pub scores: BTreeMap<String, Option<f64>>,
}

impl Row {
    fn from_record(record: &ObjectRecord) -> Self {
        Self {
            name: record.name.clone(),
            father: record.father.clone(),
            definition: record.definition.clone(),
            total_descendants: record.total_descendants,
            level: record.level,
            scores: record
                .scores
                .iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    /// Score cell for a column; `None` when absent or null.
    pub fn score(&self, column: &str) -> Option<f64> {
        self.scores.get(column).copied().flatten()
    }

    /// Cell texts in column order, empty for absent scores.
    pub fn cells(&self, score_columns: &[String]) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.father.clone(),
            self.definition.clone(),
            self.total_descendants.to_string(),
            self.level.to_string(),
        ];
        cells.extend(
            score_columns
                .iter()
                .map(|c| self.score(c).map(|v| v.to_string()).unwrap_or_default()),
        );
        cells
    }
}

/// Flat table of rows with an explicit, ordered set of score columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    score_columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Project records into a table, preserving input order.
    ///
    /// Score columns are the union of all score keys, in order of first
    /// appearance. No deduplication or hierarchy validation happens here.
    pub fn from_records(records: &[ObjectRecord]) -> Self {
        let mut seen = HashSet::new();
        let mut score_columns = Vec::new();
        for key in records.iter().flat_map(|r| r.scores.keys()) {
            if seen.insert(key) {
                score_columns.push(key.to_string());
            }
        }

        let rows: Vec<Row> = records.iter().map(Row::from_record).collect();
        debug!(
            "projected {} rows with {} score columns",
            rows.len(),
            score_columns.len()
        );

        Self {
            score_columns,
            rows,
        }
    }

    /// Subset of this table's rows, keeping every score column.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            score_columns: self.score_columns.clone(),
            rows,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn score_columns(&self) -> &[String] {
        &self.score_columns
    }

    /// All column names: base columns then score columns.
    pub fn headers(&self) -> Vec<String> {
        BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.score_columns.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Observed minimum and maximum `Level`, `None` for an empty table.
    pub fn level_bounds(&self) -> Option<(u32, u32)> {
        self.rows.iter().map(|r| r.level).minmax().into_option()
    }

    /// Sorted unique `Father` values.
    pub fn fathers(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.father.clone())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.rows.iter().any(|r| r.name == name)
    }

    pub fn contains_father(&self, father: &str) -> bool {
        self.rows.iter().any(|r| r.father == father)
    }
}
