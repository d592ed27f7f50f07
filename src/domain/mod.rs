//! Domain layer: records, table projection, subtree and filter logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod filter;
pub mod graph;
pub mod record;
pub mod subtree;
pub mod table;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::ForestBuilder;
pub use error::DomainError;
pub use filter::{LevelRange, RootSelector, TableFilter, ALL};
pub use graph::{GraphDocument, GraphEdge, GraphNode};
pub use record::{parse_records, ObjectRecord, Scores};
pub use subtree::resolve;
pub use table::{Row, Table};
