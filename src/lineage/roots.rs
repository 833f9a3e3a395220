use crate::error::Result;
use crate::lineage::person::Person;
use crate::store::{Records, RootsRecord};

/// Entry points of a snapshot: the designated root people
#[derive(Debug, Clone, Copy)]
pub struct Roots<'g> {
    records: &'g Records,
    record: &'g RootsRecord,
}

impl<'g> Roots<'g> {
    pub(crate) fn new(records: &'g Records, record: &'g RootsRecord) -> Self {
        Self { records, record }
    }

    pub fn attributes(&self) -> &'g serde_json::Value {
        &self.record.attributes
    }

    pub fn root_people(&self) -> Result<Vec<Person<'g>>> {
        self.records.resolve_people(&self.record.root_people)
    }
}
