use crate::error::Result;
use crate::snapshot::parser::SnapshotParser;
use crate::types::Snapshot;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a genealogy snapshot comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Retrieve and decode the full snapshot
    async fn fetch(&self) -> Result<Snapshot>;

    /// Human-readable location, used in logs
    fn describe(&self) -> String;
}

/// Reads a snapshot document from the local filesystem
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<Snapshot> {
        debug!("Reading snapshot file {:?}", self.path);
        let bytes = tokio::fs::read(&self.path).await?;
        SnapshotParser::parse_slice(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
