//! objtree: flatten JSON object hierarchies into tables, filter them by level
//! and subtree, export CSV, and render an interactive graph.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
