//! Working set of one invocation: the concatenated records and their table.

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{
    DomainError, ForestBuilder, GraphDocument, LevelRange, ObjectRecord, RootSelector, Table,
    TableFilter, TreeArena, ALL,
};

/// Records of all inputs plus their projected table.
///
/// The table is rebuilt wholesale from the records; there is no incremental update.
#[derive(Debug, Clone, Default)]
pub struct Session {
    records: Vec<ObjectRecord>,
    table: Table,
}

impl Session {
    pub fn new(records: Vec<ObjectRecord>) -> Self {
        let table = Table::from_records(&records);
        debug!("session: {} records", records.len());
        Self { records, table }
    }

    pub fn records(&self) -> &[ObjectRecord] {
        &self.records
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed minimum and maximum level.
    pub fn level_bounds(&self) -> Option<(u32, u32)> {
        self.table.level_bounds()
    }

    /// Level range from optional user bounds.
    ///
    /// Missing bounds default to 0 and the observed maximum level.
    pub fn level_range(&self, min: Option<u32>, max: Option<u32>) -> ApplicationResult<LevelRange> {
        let observed_max = self.level_bounds().map(|(_, hi)| hi).unwrap_or(u32::MAX);
        let range = LevelRange::new(min.unwrap_or(0), max.unwrap_or(observed_max))?;
        Ok(range)
    }

    /// Root choices: `All`, then the sorted unique fathers within the level range.
    pub fn father_options(&self, levels: LevelRange) -> Vec<String> {
        let in_range = TableFilter::new(levels, RootSelector::All).apply(&self.table);
        std::iter::once(ALL.to_string())
            .chain(in_range.fathers())
            .collect()
    }

    /// Reject a root that names neither a row nor a father.
    pub fn check_root(&self, root: &RootSelector) -> ApplicationResult<()> {
        if let RootSelector::Node(name) = root {
            if !self.table.contains_name(name) && !self.table.contains_father(name) {
                return Err(DomainError::UnknownRoot(name.clone()).into());
            }
        }
        Ok(())
    }

    pub fn apply(&self, filter: &TableFilter) -> Table {
        filter.apply(&self.table)
    }

    /// Arena trees, one per top-level father.
    pub fn forest(&self) -> ApplicationResult<Vec<TreeArena>> {
        let mut builder = ForestBuilder::new();
        Ok(builder.build_from_table(&self.table)?)
    }

    pub fn graph(&self, root_label: &str, probe_key: &str) -> GraphDocument {
        GraphDocument::from_records(&self.records, root_label, probe_key)
    }
}
