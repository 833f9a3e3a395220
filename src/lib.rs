//! Genealogical record graph and ancestry query engine.
//!
//! A [`Genea`] store is populated once from a [`Snapshot`] of person and
//! partnership records. Borrowed [`Person`] and [`Partnership`] handles then
//! navigate the graph and answer ancestry queries.

pub mod config;
pub mod error;
pub mod lineage;
pub mod reports;
pub mod snapshot;
pub mod store;
pub mod types;

pub use error::{GeneaError, Result};
pub use lineage::{AncestryTraversal, Partnership, Person, Roots};
pub use snapshot::{FileSnapshotSource, SnapshotParser, SnapshotSource};
pub use store::{Genea, GenealogyStatistics};
pub use types::{RecordKind, RecordRef, Snapshot};
