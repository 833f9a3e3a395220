pub mod genea;
pub mod records;

#[cfg(test)]
pub(crate) mod fixtures;

pub use genea::{Genea, GenealogyStatistics, Records};
pub use records::{PartnershipRecord, PersonRecord, RootsRecord};
