use crate::error::{GeneaError, Result};
use crate::lineage::{Partnership, Person, Roots};
use crate::snapshot::SnapshotSource;
use crate::store::records::{PartnershipRecord, PersonRecord, RootsRecord};
use crate::types::{RecordKind, RecordRef, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Id-indexed arena owning every record of a populated snapshot
#[derive(Debug, Default)]
pub struct Records {
    roots: RootsRecord,
    people: HashMap<String, PersonRecord>,
    partnerships: HashMap<String, PartnershipRecord>,
}

impl Records {
    /// Ingest a snapshot, failing on the first record of an unknown type
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut records = Records {
            roots: RootsRecord::from_descriptor(snapshot.data)?,
            ..Default::default()
        };

        for raw in snapshot.included {
            match RecordKind::from_tag(&raw.kind) {
                Some(RecordKind::Person) => {
                    let person = PersonRecord::from_raw(raw)?;
                    records.people.insert(person.id.clone(), person);
                }
                Some(RecordKind::Partnership) => {
                    let partnership = PartnershipRecord::from_raw(raw)?;
                    records.partnerships.insert(partnership.id.clone(), partnership);
                }
                None => return Err(GeneaError::UnknownRecordType(raw.kind)),
            }
        }

        debug!(
            "Ingested {} people and {} partnerships",
            records.people.len(),
            records.partnerships.len()
        );
        Ok(records)
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn partnership_count(&self) -> usize {
        self.partnerships.len()
    }

    pub(crate) fn roots_record(&self) -> &RootsRecord {
        &self.roots
    }

    pub fn person_by_id(&self, id: &str) -> Result<Person<'_>> {
        self.people
            .get(id)
            .map(|record| Person::new(self, record))
            .ok_or_else(|| GeneaError::UnknownRecord {
                kind: RecordKind::Person,
                id: id.to_string(),
            })
    }

    pub fn partnership_by_id(&self, id: &str) -> Result<Partnership<'_>> {
        self.partnerships
            .get(id)
            .map(|record| Partnership::new(self, record))
            .ok_or_else(|| GeneaError::UnknownRecord {
                kind: RecordKind::Partnership,
                id: id.to_string(),
            })
    }

    /// Resolve a reference expected to point at a person; `None` stays absent
    pub fn resolve_person(&self, reference: Option<&RecordRef>) -> Result<Option<Person<'_>>> {
        match reference {
            None => Ok(None),
            Some(r) => {
                expect_kind(r, RecordKind::Person)?;
                self.person_by_id(&r.id).map(Some)
            }
        }
    }

    /// Resolve a reference expected to point at a partnership; `None` stays absent
    pub fn resolve_partnership(
        &self,
        reference: Option<&RecordRef>,
    ) -> Result<Option<Partnership<'_>>> {
        match reference {
            None => Ok(None),
            Some(r) => {
                expect_kind(r, RecordKind::Partnership)?;
                self.partnership_by_id(&r.id).map(Some)
            }
        }
    }

    pub(crate) fn resolve_people(&self, references: &[RecordRef]) -> Result<Vec<Person<'_>>> {
        references
            .iter()
            .filter_map(|r| self.resolve_person(Some(r)).transpose())
            .collect()
    }

    pub(crate) fn resolve_partnerships(
        &self,
        references: &[RecordRef],
    ) -> Result<Vec<Partnership<'_>>> {
        references
            .iter()
            .filter_map(|r| self.resolve_partnership(Some(r)).transpose())
            .collect()
    }

    pub fn statistics(&self) -> GenealogyStatistics {
        let founders = self
            .people
            .values()
            .filter(|person| person.child_in.is_none())
            .count();

        GenealogyStatistics {
            people: self.people.len(),
            partnerships: self.partnerships.len(),
            root_people: self.roots.root_people.len(),
            founders,
        }
    }
}

fn expect_kind(reference: &RecordRef, expected: RecordKind) -> Result<()> {
    if reference.is(expected) {
        Ok(())
    } else {
        Err(GeneaError::TypeMismatch {
            expected,
            found: reference.clone(),
        })
    }
}

/// Summary counts over a populated store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenealogyStatistics {
    pub people: usize,
    pub partnerships: usize,
    pub root_people: usize,
    pub founders: usize,
}

/// Record store for a genealogy snapshot.
///
/// Starts empty and is populated at most once; every query before that fails
/// with [`GeneaError::NotPopulated`].
#[derive(Debug, Default)]
pub struct Genea {
    records: OnceCell<Records>,
}

impl Genea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.records.initialized()
    }

    /// Store populated directly from an in-memory snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Result<Self> {
        let records = Records::from_snapshot(snapshot)?;
        Ok(Self {
            records: OnceCell::new_with(Some(records)),
        })
    }

    /// Ingest a snapshot. A store that is already populated ignores the call.
    ///
    /// While another population is in flight this waits for it; if that one
    /// fails, this snapshot is ingested instead.
    pub async fn populate(&self, snapshot: Snapshot) -> Result<()> {
        if self.is_populated() {
            debug!("Genea already populated, ignoring snapshot");
            return Ok(());
        }

        self.records
            .get_or_try_init(|| async move {
                let records = Records::from_snapshot(snapshot)?;
                info!(
                    "Populated genea with {} people and {} partnerships",
                    records.person_count(),
                    records.partnership_count()
                );
                Ok::<_, GeneaError>(records)
            })
            .await?;
        Ok(())
    }

    /// Fetch a snapshot from `source` and ingest it.
    ///
    /// Concurrent callers wait for the single in-flight population instead of
    /// fetching again.
    pub async fn populate_from<S>(&self, source: &S) -> Result<()>
    where
        S: SnapshotSource + ?Sized,
    {
        self.records
            .get_or_try_init(|| async move {
                info!("Fetching genealogy snapshot from {}", source.describe());
                let snapshot = source.fetch().await?;
                let records = Records::from_snapshot(snapshot)?;
                info!(
                    "Populated genea with {} people and {} partnerships",
                    records.person_count(),
                    records.partnership_count()
                );
                Ok::<_, GeneaError>(records)
            })
            .await?;
        Ok(())
    }

    pub fn records(&self) -> Result<&Records> {
        self.records.get().ok_or(GeneaError::NotPopulated)
    }

    pub fn roots(&self) -> Result<Roots<'_>> {
        let records = self.records()?;
        Ok(Roots::new(records, records.roots_record()))
    }

    pub fn person(&self, id: &str) -> Result<Person<'_>> {
        self.records()?.person_by_id(id)
    }

    pub fn partnership(&self, id: &str) -> Result<Partnership<'_>> {
        self.records()?.partnership_by_id(id)
    }

    pub fn statistics(&self) -> Result<GenealogyStatistics> {
        Ok(self.records()?.statistics())
    }
}
