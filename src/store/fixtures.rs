//! Snapshot builders shared by unit tests.

use crate::store::Genea;
use crate::types::{RawRecord, RecordRef, Relationship, RootDescriptor, RootRelationships, Snapshot};
use serde_json::json;
use std::collections::HashMap;

pub fn person(id: &str, child_in: Option<&str>, parent_in: &[&str]) -> RawRecord {
    let mut relationships = HashMap::new();
    relationships.insert(
        "childIn".to_string(),
        json!({"data": child_in.map(RecordRef::partnership)}),
    );
    relationships.insert(
        "parentIn".to_string(),
        json!({"data": parent_in.iter().map(|u| RecordRef::partnership(*u)).collect::<Vec<_>>()}),
    );

    RawRecord {
        kind: "person".to_string(),
        id: id.to_string(),
        attributes: json!({"name": format!("Person {}", id), "comments": null, "isSpouse": false}),
        relationships,
    }
}

pub fn partnership(id: &str, parents: &[&str], children: &[&str]) -> RawRecord {
    let mut relationships = HashMap::new();
    relationships.insert(
        "parents".to_string(),
        json!({"data": parents.iter().map(|p| RecordRef::person(*p)).collect::<Vec<_>>()}),
    );
    relationships.insert(
        "children".to_string(),
        json!({"data": children.iter().map(|p| RecordRef::person(*p)).collect::<Vec<_>>()}),
    );

    RawRecord {
        kind: "partnership".to_string(),
        id: id.to_string(),
        attributes: json!({}),
        relationships,
    }
}

pub fn snapshot(roots: &[&str], included: Vec<RawRecord>) -> Snapshot {
    Snapshot {
        data: RootDescriptor {
            attributes: json!({}),
            relationships: RootRelationships {
                root_people: Some(Relationship::many(
                    roots.iter().map(|p| RecordRef::person(*p)).collect(),
                )),
            },
        },
        included,
    }
}

/// Parents `a` and `b` with children `c` and `d` through union `u1`
pub fn family_snapshot() -> Snapshot {
    FamilyBuilder::new()
        .union("u1", &["a", "b"], &["c", "d"])
        .roots(&["c", "d"])
        .snapshot()
}

/// Declares unions and derives bidirectionally consistent person records.
#[derive(Debug, Default)]
pub struct FamilyBuilder {
    people: Vec<String>,
    child_in: HashMap<String, String>,
    parent_in: HashMap<String, Vec<String>>,
    unions: Vec<(String, Vec<String>, Vec<String>)>,
    roots: Vec<String>,
}

impl FamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(mut self, id: &str) -> Self {
        self.touch(id);
        self
    }

    pub fn union(mut self, id: &str, parents: &[&str], children: &[&str]) -> Self {
        for parent in parents {
            self.touch(parent);
            self.parent_in
                .entry(parent.to_string())
                .or_default()
                .push(id.to_string());
        }
        for child in children {
            self.touch(child);
            self.child_in.insert(child.to_string(), id.to_string());
        }
        self.unions.push((
            id.to_string(),
            parents.iter().map(|p| p.to_string()).collect(),
            children.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn roots(mut self, ids: &[&str]) -> Self {
        self.roots = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut included = Vec::new();

        for id in &self.people {
            let parent_in: Vec<&str> = self
                .parent_in
                .get(id)
                .map(|unions| unions.iter().map(String::as_str).collect())
                .unwrap_or_default();
            included.push(person(
                id,
                self.child_in.get(id).map(String::as_str),
                &parent_in,
            ));
        }

        for (id, parents, children) in &self.unions {
            let parents: Vec<&str> = parents.iter().map(String::as_str).collect();
            let children: Vec<&str> = children.iter().map(String::as_str).collect();
            included.push(partnership(id, &parents, &children));
        }

        let roots: Vec<&str> = self.roots.iter().map(String::as_str).collect();
        snapshot(&roots, included)
    }

    pub fn build(&self) -> Genea {
        Genea::with_snapshot(self.snapshot()).expect("fixture snapshot should populate")
    }

    fn touch(&mut self, id: &str) {
        if !self.people.iter().any(|p| p == id) {
            self.people.push(id.to_string());
        }
    }
}
