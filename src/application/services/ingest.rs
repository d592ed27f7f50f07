//! Record ingestion service
//!
//! Reads JSON input files (or directories of them) and concatenates their
//! records in input order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{parse_records, ObjectRecord};
use crate::infrastructure::traits::FileSystem;

/// Extension of input documents picked up from directories.
pub const INPUT_EXTENSION: &str = "json";

/// An input file that could not be read as a record array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of loading a batch of inputs.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Records of all valid files, concatenated in input order
    pub records: Vec<ObjectRecord>,
    /// Files that contributed records
    pub loaded: Vec<PathBuf>,
    /// Malformed files, left out of the batch
    pub skipped: Vec<SkippedFile>,
}

/// Service for loading object records from JSON documents.
pub struct IngestService {
    fs: Arc<dyn FileSystem>,
}

impl IngestService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load all inputs; malformed files are skipped and reported.
    ///
    /// Fails only when an input path does not exist or a directory cannot be listed.
    pub fn load(&self, inputs: &[PathBuf]) -> ApplicationResult<IngestReport> {
        let files = self.expand_inputs(inputs)?;
        debug!("load: {} input files", files.len());

        let mut report = IngestReport::default();
        for file in files {
            match self.load_file(&file) {
                Ok(records) => {
                    debug!("load: {} records from {}", records.len(), file.display());
                    report.records.extend(records);
                    report.loaded.push(file);
                }
                Err(e) => {
                    warn!("skipping {}: {}", file.display(), e);
                    report.skipped.push(SkippedFile {
                        reason: match e {
                            ApplicationError::InvalidFile { message, .. } => message,
                            other => other.to_string(),
                        },
                        path: file,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Resolve inputs to files: directories are walked for `*.json` in path order.
    pub fn expand_inputs(&self, inputs: &[PathBuf]) -> ApplicationResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for input in inputs {
            if !self.fs.exists(input) {
                return Err(ApplicationError::InputNotFound(input.clone()));
            }
            if self.fs.is_dir(input) {
                let found = self
                    .fs
                    .list_files(input, INPUT_EXTENSION)
                    .map_err(|e| ApplicationError::OperationFailed {
                        context: format!("list directory {}", input.display()),
                        source: Box::new(e),
                    })?;
                debug!("expand: {} json files in {}", found.len(), input.display());
                files.extend(found);
            } else {
                files.push(input.clone());
            }
        }
        Ok(files)
    }

    /// Read and parse a single document holding an array of records.
    pub fn load_file(&self, path: &Path) -> ApplicationResult<Vec<ObjectRecord>> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ApplicationError::InvalidFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        parse_records(&content).map_err(|e| ApplicationError::InvalidFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
