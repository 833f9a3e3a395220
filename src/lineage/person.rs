use crate::error::Result;
use crate::lineage::partnership::Partnership;
use crate::lineage::traversal::AncestryTraversal;
use crate::store::{PersonRecord, Records};
use crate::types::PersonAttributes;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Borrowed view of a person, resolving relations through the owning store
#[derive(Clone, Copy)]
pub struct Person<'g> {
    records: &'g Records,
    record: &'g PersonRecord,
}

impl<'g> Person<'g> {
    pub(crate) fn new(records: &'g Records, record: &'g PersonRecord) -> Self {
        Self { records, record }
    }

    pub fn id(&self) -> &'g str {
        &self.record.id
    }

    pub fn attributes(&self) -> &'g PersonAttributes {
        &self.record.attributes
    }

    pub fn name(&self) -> Option<&'g str> {
        self.record.attributes.name.as_deref()
    }

    pub fn comments(&self) -> Option<&'g str> {
        self.record.attributes.comments.as_deref()
    }

    pub fn is_spouse(&self) -> bool {
        self.record.attributes.is_spouse
    }

    /// Spouses or other partners, one entry per shared union
    pub fn partners(&self) -> Result<Vec<Person<'g>>> {
        let mut partners = Vec::new();
        for partnership in self.parent_in()? {
            partners.extend(partnership.partners_to(self)?);
        }
        Ok(partners)
    }

    /// Partnership in which this person is a child, if recorded
    pub fn child_in(&self) -> Result<Option<Partnership<'g>>> {
        self.records.resolve_partnership(self.record.child_in.as_ref())
    }

    /// Partnerships in which this person is a parent (or partner)
    pub fn parent_in(&self) -> Result<Vec<Partnership<'g>>> {
        self.records.resolve_partnerships(&self.record.parent_in)
    }

    pub fn child_in_array(&self) -> Result<Vec<Partnership<'g>>> {
        Ok(self.child_in()?.into_iter().collect())
    }

    /// Every partnership involving this person's ancestors, origin union included
    pub fn ancestral_partnerships(&self) -> Result<HashSet<Partnership<'g>>> {
        AncestryTraversal::ancestral_partnerships(self)
    }

    pub fn all_ancestors(&self) -> Result<HashSet<Person<'g>>> {
        AncestryTraversal::all_ancestors(self)
    }

    /// Closest partnerships joining this person's line with `other`'s
    pub fn common_ancestral_partnerships_with(
        &self,
        other: &Person<'g>,
    ) -> Result<Vec<Partnership<'g>>> {
        AncestryTraversal::common_ancestral_partnerships(self, other)
    }

    pub fn descends_from(&self, ancestor: &Person<'g>) -> Result<bool> {
        AncestryTraversal::descends_from(self, ancestor)
    }
}

impl PartialEq for Person<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.record.id == other.record.id
    }
}

impl Eq for Person<'_> {}

impl Hash for Person<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record.id.hash(state);
    }
}

impl fmt::Debug for Person<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Person")
            .field("id", &self.record.id)
            .field("name", &self.record.attributes.name)
            .finish()
    }
}
