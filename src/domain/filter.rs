//! Level-range and subtree filters over a table.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::subtree::resolve;
use crate::domain::table::Table;

/// Selector value meaning "no subtree restriction".
pub const ALL: &str = "All";

/// Closed interval of levels, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    min: u32,
    max: u32,
}

impl LevelRange {
    pub fn new(min: u32, max: u32) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::InvalidLevelRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Range accepting every level.
    pub fn unbounded() -> Self {
        Self {
            min: 0,
            max: u32::MAX,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, level: u32) -> bool {
        self.min <= level && level <= self.max
    }
}

/// Subtree restriction: everything, or one node and its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RootSelector {
    #[default]
    All,
    Node(String),
}

impl From<&str> for RootSelector {
    fn from(s: &str) -> Self {
        if s == ALL {
            RootSelector::All
        } else {
            RootSelector::Node(s.to_string())
        }
    }
}

impl FromStr for RootSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RootSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootSelector::All => write!(f, "{}", ALL),
            RootSelector::Node(name) => write!(f, "{}", name),
        }
    }
}

/// Level filter followed by an optional subtree filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    pub levels: LevelRange,
    pub root: RootSelector,
}

impl Default for TableFilter {
    fn default() -> Self {
        Self {
            levels: LevelRange::unbounded(),
            root: RootSelector::All,
        }
    }
}

impl TableFilter {
    pub fn new(levels: LevelRange, root: RootSelector) -> Self {
        Self { levels, root }
    }

    /// Apply the filter, keeping the table's columns.
    ///
    /// Subtree membership is resolved over the whole input table, not over
    /// the level-filtered rows, so a node outside the level range still links
    /// its children into the subtree.
    pub fn apply(&self, table: &Table) -> Table {
        let in_range = table
            .rows()
            .iter()
            .filter(|r| self.levels.contains(r.level));

        let rows = match &self.root {
            RootSelector::All => in_range.cloned().collect(),
            RootSelector::Node(root) => {
                let members = resolve(table, root);
                in_range
                    .filter(|r| members.contains(&r.name))
                    .cloned()
                    .collect()
            }
        };

        let filtered = table.with_rows(rows);
        debug!(
            "filter: levels={}..={} root={} kept {}/{} rows",
            self.levels.min,
            self.levels.max,
            self.root,
            filtered.len(),
            table.len()
        );
        filtered
    }
}
