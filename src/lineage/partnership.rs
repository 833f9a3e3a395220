use crate::error::Result;
use crate::lineage::person::Person;
use crate::store::{PartnershipRecord, Records};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Borrowed view of a union of two or more people and their children
#[derive(Clone, Copy)]
pub struct Partnership<'g> {
    records: &'g Records,
    record: &'g PartnershipRecord,
}

impl<'g> Partnership<'g> {
    pub(crate) fn new(records: &'g Records, record: &'g PartnershipRecord) -> Self {
        Self { records, record }
    }

    pub fn id(&self) -> &'g str {
        &self.record.id
    }

    pub fn attributes(&self) -> &'g serde_json::Value {
        &self.record.attributes
    }

    pub fn parents(&self) -> Result<Vec<Person<'g>>> {
        self.records.resolve_people(&self.record.parents)
    }

    pub fn children(&self) -> Result<Vec<Person<'g>>> {
        self.records.resolve_people(&self.record.children)
    }

    pub fn parent_set(&self) -> Result<HashSet<Person<'g>>> {
        Ok(self.parents()?.into_iter().collect())
    }

    pub fn first_parent(&self) -> Result<Option<Person<'g>>> {
        Ok(self.parents()?.into_iter().next())
    }

    pub fn next_parents(&self) -> Result<Vec<Person<'g>>> {
        Ok(self.parents()?.into_iter().skip(1).collect())
    }

    /// First parent of this union other than `person`
    pub fn partner_to(&self, person: &Person<'_>) -> Result<Option<Person<'g>>> {
        Ok(self.parents()?.into_iter().find(|p| p.id() != person.id()))
    }

    /// Every parent of this union other than `person`
    pub fn partners_to(&self, person: &Person<'_>) -> Result<Vec<Person<'g>>> {
        Ok(self
            .parents()?
            .into_iter()
            .filter(|p| p.id() != person.id())
            .collect())
    }
}

impl PartialEq for Partnership<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.record.id == other.record.id
    }
}

impl Eq for Partnership<'_> {}

impl Hash for Partnership<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record.id.hash(state);
    }
}

impl fmt::Debug for Partnership<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partnership")
            .field("id", &self.record.id)
            .field("parents", &self.record.parents.len())
            .field("children", &self.record.children.len())
            .finish()
    }
}
