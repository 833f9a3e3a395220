pub mod parser;
pub mod source;

pub use parser::SnapshotParser;
pub use source::{FileSnapshotSource, SnapshotSource};
