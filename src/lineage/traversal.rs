use crate::error::Result;
use crate::lineage::partnership::Partnership;
use crate::lineage::person::Person;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Ancestry queries over the partnership graph.
///
/// Every walk keeps its own visited set and expands each partnership at most
/// once, so traversal terminates even when the data contains a cycle.
pub struct AncestryTraversal;

impl AncestryTraversal {
    /// Origin partnerships of every parent of `partnership`
    pub fn parent_origins<'g>(partnership: &Partnership<'g>) -> Result<Vec<Partnership<'g>>> {
        let mut origins = Vec::new();
        for parent in partnership.parents()? {
            origins.extend(parent.child_in_array()?);
        }
        Ok(origins)
    }

    /// Depth-first walk from the person's origin union through every ancestral union
    pub fn ancestral_partnerships<'g>(person: &Person<'g>) -> Result<HashSet<Partnership<'g>>> {
        let mut stack = person.child_in_array()?;
        let mut visited: HashSet<Partnership<'g>> = stack.iter().copied().collect();

        while let Some(partnership) = stack.pop() {
            for origin in Self::parent_origins(&partnership)? {
                if visited.insert(origin) {
                    stack.push(origin);
                }
            }
        }

        debug!(
            "Found {} ancestral partnerships for person {}",
            visited.len(),
            person.id()
        );
        Ok(visited)
    }

    /// Every parent of every ancestral union, deduplicated
    pub fn all_ancestors<'g>(person: &Person<'g>) -> Result<HashSet<Person<'g>>> {
        let mut ancestors = HashSet::new();
        for partnership in Self::ancestral_partnerships(person)? {
            ancestors.extend(partnership.parents()?);
        }
        Ok(ancestors)
    }

    /// Partnerships where the lines of `this` and `other` meet.
    ///
    /// A partnership qualifies when it is ancestral to both people, or when one
    /// of them is a parent in it and the other descends through it. The walk
    /// from `other` stops at the first qualifying partnership on each branch,
    /// which keeps only the closest ones. A partnership may be reported twice
    /// when it qualifies from both directions.
    pub fn common_ancestral_partnerships<'g>(
        this: &Person<'g>,
        other: &Person<'g>,
    ) -> Result<Vec<Partnership<'g>>> {
        let my_ancestors = Self::ancestral_partnerships(this)?;

        let mut queue: VecDeque<Partnership<'g>> = other.child_in_array()?.into();
        let mut visited: HashSet<Partnership<'g>> = queue.iter().copied().collect();
        let mut result = Vec::new();

        while let Some(partnership) = queue.pop_front() {
            if my_ancestors.contains(&partnership) {
                result.push(partnership);
                continue;
            }

            if partnership.parent_set()?.contains(this) {
                result.push(partnership);
                continue;
            }

            for origin in Self::parent_origins(&partnership)? {
                if visited.insert(origin) {
                    queue.push_back(origin);
                }
            }
        }

        for ancestor in &my_ancestors {
            if ancestor.parent_set()?.contains(other) {
                result.push(*ancestor);
            }
        }

        debug!(
            "Found {} common ancestral partnerships between {} and {}",
            result.len(),
            this.id(),
            other.id()
        );
        Ok(result)
    }

    /// Whether `ancestor` is a parent in any union ancestral to `descendant`
    pub fn descends_from(descendant: &Person<'_>, ancestor: &Person<'_>) -> Result<bool> {
        for partnership in Self::ancestral_partnerships(descendant)? {
            if partnership.parents()?.iter().any(|p| p.id() == ancestor.id()) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneaError;
    use crate::store::fixtures::{person, FamilyBuilder};
    use crate::store::Genea;
    use crate::types::RecordKind;

    fn ids<'a, I>(items: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ids: Vec<String> = items.into_iter().map(str::to_string).collect();
        ids.sort();
        ids
    }

    /// Cousins: `c` and `d` are grandchildren of `g1`/`g2` through siblings `a` and `e`
    fn cousins() -> Genea {
        FamilyBuilder::new()
            .union("u0", &["g1", "g2"], &["a", "e"])
            .union("u1", &["a", "x"], &["c"])
            .union("u2", &["e", "y"], &["d"])
            .person("z")
            .roots(&["c", "d"])
            .build()
    }

    #[test]
    fn test_ancestral_partnerships_walks_every_line() {
        let genea = cousins();
        let c = genea.person("c").unwrap();

        let partnerships = c.ancestral_partnerships().unwrap();
        assert_eq!(ids(partnerships.iter().map(|p| p.id())), vec!["u0", "u1"]);
    }

    #[test]
    fn test_ancestral_partnerships_of_founder_is_empty() {
        let genea = cousins();
        let g1 = genea.person("g1").unwrap();

        assert!(g1.ancestral_partnerships().unwrap().is_empty());
        assert!(g1.all_ancestors().unwrap().is_empty());
    }

    #[test]
    fn test_ancestral_partnerships_is_idempotent() {
        let genea = cousins();
        let d = genea.person("d").unwrap();

        assert_eq!(
            d.ancestral_partnerships().unwrap(),
            d.ancestral_partnerships().unwrap()
        );
    }

    #[test]
    fn test_shared_ancestry_is_visited_once() {
        // Both parents of `c` descend from u0 (pedigree collapse)
        let genea = FamilyBuilder::new()
            .union("u0", &["g1", "g2"], &["a", "b"])
            .union("u1", &["a", "b"], &["c"])
            .build();
        let c = genea.person("c").unwrap();

        let partnerships = c.ancestral_partnerships().unwrap();
        assert_eq!(ids(partnerships.iter().map(|p| p.id())), vec!["u0", "u1"]);
        assert_eq!(
            ids(c.all_ancestors().unwrap().iter().map(|p| p.id())),
            vec!["a", "b", "g1", "g2"]
        );
    }

    #[test]
    fn test_all_ancestors_excludes_self() {
        let genea = cousins();
        let c = genea.person("c").unwrap();

        let ancestors = c.all_ancestors().unwrap();
        assert!(!ancestors.contains(&c));
        assert_eq!(
            ids(ancestors.iter().map(|p| p.id())),
            vec!["a", "g1", "g2", "x"]
        );
    }

    #[test]
    fn test_common_with_founder_parent() {
        let genea = FamilyBuilder::new().union("u1", &["a", "x"], &["b"]).build();
        let a = genea.person("a").unwrap();
        let b = genea.person("b").unwrap();

        let common = b.common_ancestral_partnerships_with(&a).unwrap();
        assert!(common.iter().any(|p| p.id() == "u1"));

        // Same meeting point found from the other direction
        let common = a.common_ancestral_partnerships_with(&b).unwrap();
        assert!(common.iter().any(|p| p.id() == "u1"));
    }

    #[test]
    fn test_common_for_siblings_is_shared_origin() {
        let genea = FamilyBuilder::new()
            .union("u0", &["g1", "g2"], &["a"])
            .union("u1", &["a", "b"], &["c", "d"])
            .build();
        let c = genea.person("c").unwrap();
        let d = genea.person("d").unwrap();

        let common = c.common_ancestral_partnerships_with(&d).unwrap();
        assert_eq!(ids(common.iter().map(|p| p.id())), vec!["u1"]);
    }

    #[test]
    fn test_common_for_cousins_is_grandparents_union() {
        let genea = cousins();
        let c = genea.person("c").unwrap();
        let d = genea.person("d").unwrap();

        let common = c.common_ancestral_partnerships_with(&d).unwrap();
        let common_ids = ids(common.iter().map(|p| p.id()));
        assert_eq!(common_ids, vec!["u0"]);
        assert!(!common_ids.contains(&"u1".to_string()));
        assert!(!common_ids.contains(&"u2".to_string()));
    }

    #[test]
    fn test_common_for_unrelated_is_empty() {
        let genea = FamilyBuilder::new()
            .union("u1", &["a", "b"], &["c"])
            .union("u2", &["e", "f"], &["d"])
            .build();
        let c = genea.person("c").unwrap();
        let d = genea.person("d").unwrap();

        assert!(c.common_ancestral_partnerships_with(&d).unwrap().is_empty());
        assert!(d.common_ancestral_partnerships_with(&c).unwrap().is_empty());
    }

    #[test]
    fn test_common_with_isolated_person_is_empty() {
        let genea = cousins();
        let c = genea.person("c").unwrap();
        let z = genea.person("z").unwrap();

        assert!(c.common_ancestral_partnerships_with(&z).unwrap().is_empty());
    }

    #[test]
    fn test_common_with_grandparent_stops_at_their_union() {
        let genea = cousins();
        let g1 = genea.person("g1").unwrap();
        let c = genea.person("c").unwrap();

        // From c's side, g1 is a direct parent of u0
        let common = g1.common_ancestral_partnerships_with(&c).unwrap();
        assert_eq!(ids(common.iter().map(|p| p.id())), vec!["u0"]);

        // From g1's side, u0 is found by scanning c's ancestral unions
        let common = c.common_ancestral_partnerships_with(&g1).unwrap();
        assert_eq!(ids(common.iter().map(|p| p.id())), vec!["u0"]);
    }

    #[test]
    fn test_descends_from() {
        let genea = cousins();
        let c = genea.person("c").unwrap();
        let g2 = genea.person("g2").unwrap();
        let d = genea.person("d").unwrap();

        assert!(c.descends_from(&g2).unwrap());
        assert!(!g2.descends_from(&c).unwrap());
        assert!(!c.descends_from(&d).unwrap());
        assert!(!c.descends_from(&c).unwrap());
    }

    #[test]
    fn test_cyclic_data_terminates() {
        // a is recorded as a child of a union they are a parent in
        let genea = FamilyBuilder::new()
            .union("u1", &["a", "b"], &["a", "c"])
            .build();
        let c = genea.person("c").unwrap();
        let a = genea.person("a").unwrap();

        let partnerships = c.ancestral_partnerships().unwrap();
        assert_eq!(ids(partnerships.iter().map(|p| p.id())), vec!["u1"]);
        assert!(a.all_ancestors().unwrap().contains(&a));
        assert!(c.common_ancestral_partnerships_with(&a).unwrap().iter().any(|p| p.id() == "u1"));
    }

    /// c's grandparents' union u0 lists a parent with no person record
    fn lineage_with_missing_grandparent() -> Genea {
        let mut snapshot = FamilyBuilder::new()
            .union("u0", &["g1", "ghost"], &["a"])
            .union("u1", &["a", "x"], &["c"])
            .union("u2", &["p", "q"], &["y"])
            .snapshot();
        snapshot.included.retain(|record| record.id != "ghost");
        Genea::with_snapshot(snapshot).unwrap()
    }

    #[test]
    fn test_missing_parent_surfaces_from_ancestral_walk() {
        let genea = lineage_with_missing_grandparent();
        let c = genea.person("c").unwrap();

        assert!(matches!(
            c.ancestral_partnerships(),
            Err(GeneaError::UnknownRecord { kind: RecordKind::Person, ref id }) if id == "ghost"
        ));
        assert!(matches!(
            c.all_ancestors(),
            Err(GeneaError::UnknownRecord { kind: RecordKind::Person, .. })
        ));
        let x = genea.person("x").unwrap();
        assert!(x.ancestral_partnerships().unwrap().is_empty());
    }

    #[test]
    fn test_missing_parent_surfaces_from_common_search_in_both_directions() {
        let genea = lineage_with_missing_grandparent();
        let c = genea.person("c").unwrap();
        let y = genea.person("y").unwrap();

        assert!(matches!(
            c.common_ancestral_partnerships_with(&y),
            Err(GeneaError::UnknownRecord { kind: RecordKind::Person, ref id }) if id == "ghost"
        ));
        assert!(matches!(
            y.common_ancestral_partnerships_with(&c),
            Err(GeneaError::UnknownRecord { kind: RecordKind::Person, ref id }) if id == "ghost"
        ));
    }

    #[test]
    fn test_missing_origin_partnership_surfaces_mid_walk() {
        let mut snapshot = FamilyBuilder::new()
            .union("u1", &["a", "x"], &["c"])
            .snapshot();
        snapshot.included.retain(|record| record.id != "a");
        snapshot.included.push(person("a", Some("u-lost"), &["u1"]));
        let genea = Genea::with_snapshot(snapshot).unwrap();
        let c = genea.person("c").unwrap();
        let x = genea.person("x").unwrap();

        assert!(matches!(
            c.ancestral_partnerships(),
            Err(GeneaError::UnknownRecord { kind: RecordKind::Partnership, ref id }) if id == "u-lost"
        ));
        assert!(matches!(
            c.descends_from(&x),
            Err(GeneaError::UnknownRecord { kind: RecordKind::Partnership, .. })
        ));
    }
}
