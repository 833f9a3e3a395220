use crate::error::{GeneaError, Result};
use crate::types::{Linkage, PersonAttributes, RawRecord, RecordRef, Relationship, RootDescriptor};
use serde::Deserialize;
use serde_json::Value;

/// Stored form of a person; relations stay as unresolved references
#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub id: String,
    pub attributes: PersonAttributes,
    pub child_in: Option<RecordRef>,
    pub parent_in: Vec<RecordRef>,
}

/// Stored form of a partnership
#[derive(Debug, Clone)]
pub struct PartnershipRecord {
    pub id: String,
    pub attributes: serde_json::Value,
    pub parents: Vec<RecordRef>,
    pub children: Vec<RecordRef>,
}

#[derive(Debug, Clone, Default)]
pub struct RootsRecord {
    pub attributes: serde_json::Value,
    pub root_people: Vec<RecordRef>,
}

impl PersonRecord {
    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        let attributes = if raw.attributes.is_null() {
            PersonAttributes::default()
        } else {
            serde_json::from_value(raw.attributes.clone())
                .map_err(|e| GeneaError::malformed(&raw.id, e.to_string()))?
        };

        let child_in = single(&raw.id, decode(&raw, "childIn")?.as_ref())?;
        let parent_in = many(&raw.id, decode(&raw, "parentIn")?.as_ref())?;

        Ok(Self {
            id: raw.id,
            attributes,
            child_in,
            parent_in,
        })
    }
}

impl PartnershipRecord {
    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        let parents = many(&raw.id, decode(&raw, "parents")?.as_ref())?;
        let children = many(&raw.id, decode(&raw, "children")?.as_ref())?;

        Ok(Self {
            id: raw.id,
            attributes: raw.attributes,
            parents,
            children,
        })
    }
}

impl RootsRecord {
    pub fn from_descriptor(descriptor: RootDescriptor) -> Result<Self> {
        let root_people = many("roots", descriptor.relationships.root_people.as_ref())?;
        Ok(Self {
            attributes: descriptor.attributes,
            root_people,
        })
    }
}

/// Decode one named relationship entry of a record whose type is already known
fn decode(raw: &RawRecord, name: &str) -> Result<Option<Relationship>> {
    raw.relationships
        .get(name)
        .map(|value: &Value| {
            Relationship::deserialize(value)
                .map_err(|e| GeneaError::malformed(&raw.id, format!("{}: {}", name, e)))
        })
        .transpose()
}

/// To-one relationship; a missing entry means no reference
fn single(id: &str, relationship: Option<&Relationship>) -> Result<Option<RecordRef>> {
    match relationship.map(Relationship::linkage) {
        None => Ok(None),
        Some(Linkage::One(reference)) => Ok(reference.clone()),
        Some(Linkage::Many(_)) => Err(GeneaError::malformed(
            id,
            "expected a single reference, found a list",
        )),
    }
}

/// To-many relationship; a missing entry means an empty list
fn many(id: &str, relationship: Option<&Relationship>) -> Result<Vec<RecordRef>> {
    match relationship.map(Relationship::linkage) {
        None | Some(Linkage::One(None)) => Ok(Vec::new()),
        Some(Linkage::Many(references)) => Ok(references.clone()),
        Some(Linkage::One(Some(_))) => Err(GeneaError::malformed(
            id,
            "expected a list of references, found a single reference",
        )),
    }
}
