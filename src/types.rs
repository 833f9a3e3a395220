//! Wire-level types for genealogy snapshots.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kinds of record the store knows how to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Person,
    Partnership,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Person => "person",
            RecordKind::Partnership => "partnership",
        }
    }

    /// Parse a wire tag, returning `None` for anything unrecognised
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "person" => Some(RecordKind::Person),
            "partnership" => Some(RecordKind::Partnership),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed pointer to another record.
///
/// The declared type is kept as the raw wire tag so that a reference of an
/// unexpected type can still be carried and reported by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl RecordRef {
    pub fn new(kind: RecordKind, id: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            id: id.into(),
        }
    }

    pub fn person(id: impl Into<String>) -> Self {
        Self::new(RecordKind::Person, id)
    }

    pub fn partnership(id: impl Into<String>) -> Self {
        Self::new(RecordKind::Partnership, id)
    }

    pub fn declared_kind(&self) -> Option<RecordKind> {
        RecordKind::from_tag(&self.kind)
    }

    pub fn is(&self, kind: RecordKind) -> bool {
        self.kind == kind.as_str()
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"type\":\"{}\",\"id\":\"{}\"}}", self.kind, self.id)
    }
}

/// Resource linkage: a single optional reference or a list of references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    Many(Vec<RecordRef>),
    One(Option<RecordRef>),
}

/// A relationship entry, either wrapped in `{"data": ...}` or given bare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relationship {
    Wrapped { data: Linkage },
    Bare(Linkage),
}

impl Relationship {
    pub fn linkage(&self) -> &Linkage {
        match self {
            Relationship::Wrapped { data } => data,
            Relationship::Bare(linkage) => linkage,
        }
    }

    pub fn one(reference: Option<RecordRef>) -> Self {
        Relationship::Wrapped {
            data: Linkage::One(reference),
        }
    }

    pub fn many(references: Vec<RecordRef>) -> Self {
        Relationship::Wrapped {
            data: Linkage::Many(references),
        }
    }
}

/// A record as it appears in the snapshot's `included` collection.
///
/// Relationship entries stay undecoded until the record's type is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub relationships: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootRelationships {
    #[serde(rename = "rootPeople", default)]
    pub root_people: Option<Relationship>,
}

/// The distinguished root descriptor of a snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootDescriptor {
    #[serde(default)]
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub relationships: RootRelationships,
}

/// A complete genealogy snapshot: root descriptor plus every record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub data: RootDescriptor,
    #[serde(default)]
    pub included: Vec<RawRecord>,
}

/// Scalar attributes carried by a person record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_spouse: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}
