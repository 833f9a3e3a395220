use crate::error::Result;
use crate::types::Snapshot;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Decodes genealogy snapshot documents (`{"data": ..., "included": [...]}`)
pub struct SnapshotParser;

impl SnapshotParser {
    pub fn parse_str(content: &str) -> Result<Snapshot> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Self::log_summary(&snapshot);
        Ok(snapshot)
    }

    pub fn parse_slice(bytes: &[u8]) -> Result<Snapshot> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)?;
        Self::log_summary(&snapshot);
        Ok(snapshot)
    }

    /// Blocking read of a snapshot file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
        let path = path.as_ref();
        debug!("Loading snapshot from: {:?}", path);
        let bytes = fs::read(path)?;
        Self::parse_slice(&bytes)
    }

    fn log_summary(snapshot: &Snapshot) {
        debug!(
            "Parsed snapshot with {} included records",
            snapshot.included.len()
        );
    }
}
