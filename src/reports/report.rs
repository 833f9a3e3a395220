use crate::error::Result;
use crate::lineage::{Partnership, Person};
use crate::store::{Genea, GenealogyStatistics};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: String,
    pub name: Option<String>,
    pub comments: Option<String>,
    pub is_spouse: bool,
}

impl PersonSummary {
    pub fn from_person(person: &Person<'_>) -> Self {
        Self {
            id: person.id().to_string(),
            name: person.name().map(str::to_string),
            comments: person.comments().map(str::to_string),
            is_spouse: person.is_spouse(),
        }
    }

    /// Name if recorded, otherwise the id
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipSummary {
    pub id: String,
    pub parents: Vec<PersonSummary>,
    pub children: Vec<String>,
}

impl PartnershipSummary {
    pub fn from_partnership(partnership: &Partnership<'_>) -> Result<Self> {
        Ok(Self {
            id: partnership.id().to_string(),
            parents: summarize_people(partnership.parents()?, false),
            children: partnership
                .children()?
                .iter()
                .map(|child| child.id().to_string())
                .collect(),
        })
    }
}

/// Result of one CLI query, ready for formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryReport {
    Roots {
        people: Vec<PersonSummary>,
    },
    Person {
        person: PersonSummary,
        child_in: Option<String>,
        parent_in: Vec<String>,
        partners: Vec<PersonSummary>,
    },
    Ancestors {
        person: PersonSummary,
        partnerships: Vec<PartnershipSummary>,
        ancestors: Vec<PersonSummary>,
    },
    Common {
        first: PersonSummary,
        second: PersonSummary,
        partnerships: Vec<PartnershipSummary>,
    },
    Descends {
        descendant: PersonSummary,
        ancestor: PersonSummary,
        descends: bool,
    },
    Statistics {
        statistics: GenealogyStatistics,
    },
}

impl QueryReport {
    pub fn roots(genea: &Genea) -> Result<Self> {
        let people = genea.roots()?.root_people()?;
        Ok(QueryReport::Roots {
            people: summarize_people(people, false),
        })
    }

    pub fn person(person: &Person<'_>) -> Result<Self> {
        Ok(QueryReport::Person {
            person: PersonSummary::from_person(person),
            child_in: person.child_in()?.map(|p| p.id().to_string()),
            parent_in: person
                .parent_in()?
                .iter()
                .map(|p| p.id().to_string())
                .collect(),
            partners: summarize_people(person.partners()?, false),
        })
    }

    pub fn ancestors(person: &Person<'_>) -> Result<Self> {
        let mut partnerships = person
            .ancestral_partnerships()?
            .iter()
            .map(PartnershipSummary::from_partnership)
            .collect::<Result<Vec<_>>>()?;
        partnerships.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(QueryReport::Ancestors {
            person: PersonSummary::from_person(person),
            partnerships,
            ancestors: summarize_people(person.all_ancestors()?, true),
        })
    }

    /// Common partnerships, deduplicated and ordered by id
    pub fn common(first: &Person<'_>, second: &Person<'_>) -> Result<Self> {
        let mut found = first.common_ancestral_partnerships_with(second)?;
        found.sort_by(|a, b| a.id().cmp(b.id()));
        found.dedup();

        Ok(QueryReport::Common {
            first: PersonSummary::from_person(first),
            second: PersonSummary::from_person(second),
            partnerships: found
                .iter()
                .map(PartnershipSummary::from_partnership)
                .collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn descends(descendant: &Person<'_>, ancestor: &Person<'_>) -> Result<Self> {
        Ok(QueryReport::Descends {
            descendant: PersonSummary::from_person(descendant),
            ancestor: PersonSummary::from_person(ancestor),
            descends: descendant.descends_from(ancestor)?,
        })
    }

    pub fn statistics(genea: &Genea) -> Result<Self> {
        Ok(QueryReport::Statistics {
            statistics: genea.statistics()?,
        })
    }
}

fn summarize_people<'g, I>(people: I, sort: bool) -> Vec<PersonSummary>
where
    I: IntoIterator<Item = Person<'g>>,
{
    let mut summaries: Vec<PersonSummary> = people
        .into_iter()
        .map(|person| PersonSummary::from_person(&person))
        .collect();
    if sort {
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
    }
    summaries
}
