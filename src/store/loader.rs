//! @ai:module:intent JSON reader for persisted student test outcomes
//! @ai:module:layer infrastructure
//! @ai:module:public_api StoreReader, StoreReaderTrait
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::store::model::ReportRequest;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for reading report requests from storage
pub trait StoreReaderTrait: Send + Sync {
    /// @ai:intent Load a single report request file
    fn load(&self, path: &Path) -> Result<ReportRequest>;

    /// @ai:intent Load every report request under a directory
    fn load_dir(&self, dir: &Path) -> Result<Vec<ReportRequest>>;
}

/// @ai:intent Reads report requests exported by the persistence layer
pub struct StoreReader;

impl StoreReader {
    /// @ai:intent Create a new store reader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Find all JSON files in directory
    /// @ai:effects fs:read
    fn find_request_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.path()
                        .extension()
                        .map(|ext| ext == "json")
                        .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }
}

impl Default for StoreReader {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreReaderTrait for StoreReader {
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    fn load(&self, path: &Path) -> Result<ReportRequest> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::RequestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let request: ReportRequest =
            serde_json::from_str(&content).map_err(|source| Error::RequestParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            "Loaded {} results for student {} from {}",
            request.results.len(),
            request.student.control_number,
            path.display()
        );

        Ok(request)
    }

    /// @ai:effects fs:read
    fn load_dir(&self, dir: &Path) -> Result<Vec<ReportRequest>> {
        let files = Self::find_request_files(dir);
        let mut requests = Vec::with_capacity(files.len());

        for path in files {
            match self.load(&path) {
                Ok(request) => requests.push(request),
                Err(e) => {
                    tracing::warn!("Skipping invalid report request {}: {}", path.display(), e);
                }
            }
        }

        Ok(requests)
    }
}
