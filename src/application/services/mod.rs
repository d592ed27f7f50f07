//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Selector)
//! but are themselves concrete structs, not traits.

mod export;
mod graph;
mod ingest;

pub use export::{to_csv, ExportService, DEFAULT_EXPORT_FILE};
pub use graph::{render_html, GraphOptions, GraphService, DEFAULT_GRAPH_FILE};
pub use ingest::{IngestReport, IngestService, SkippedFile, INPUT_EXTENSION};
