use crate::reports::report::{PartnershipSummary, PersonSummary, QueryReport};
use anyhow::Result;
use std::fmt::Write;

/// Trait for report formatters
pub trait ReportFormatter {
    fn format(&self, report: &QueryReport) -> Result<String>;
}

/// JSON formatter
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &QueryReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

/// Plain text formatter
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &QueryReport) -> Result<String> {
        let mut out = String::new();

        match report {
            QueryReport::Roots { people } => {
                writeln!(out, "Root people ({}):", people.len())?;
                for person in people {
                    writeln!(out, "- {}", person_line(person))?;
                }
            }
            QueryReport::Person {
                person,
                child_in,
                parent_in,
                partners,
            } => {
                writeln!(out, "{}", person_line(person))?;
                if let Some(comments) = &person.comments {
                    writeln!(out, "Comments: {}", comments)?;
                }
                writeln!(out, "Child in: {}", child_in.as_deref().unwrap_or("none"))?;
                writeln!(out, "Parent in: {}", list_or_none(parent_in))?;
                let partner_names: Vec<String> =
                    partners.iter().map(|p| p.label().to_string()).collect();
                writeln!(out, "Partners: {}", list_or_none(&partner_names))?;
            }
            QueryReport::Ancestors {
                person,
                partnerships,
                ancestors,
            } => {
                writeln!(out, "Ancestry of {}", person_line(person))?;
                writeln!(out, "Ancestral partnerships ({}):", partnerships.len())?;
                for partnership in partnerships {
                    writeln!(out, "- {}", partnership_line(partnership))?;
                }
                writeln!(out, "Ancestors ({}):", ancestors.len())?;
                for ancestor in ancestors {
                    writeln!(out, "- {}", person_line(ancestor))?;
                }
            }
            QueryReport::Common {
                first,
                second,
                partnerships,
            } => {
                writeln!(
                    out,
                    "Common ancestral partnerships of {} and {} ({}):",
                    first.label(),
                    second.label(),
                    partnerships.len()
                )?;
                for partnership in partnerships {
                    writeln!(out, "- {}", partnership_line(partnership))?;
                }
            }
            QueryReport::Descends {
                descendant,
                ancestor,
                descends,
            } => {
                let verdict = if *descends { "descends" } else { "does not descend" };
                writeln!(
                    out,
                    "{} {} from {}",
                    descendant.label(),
                    verdict,
                    ancestor.label()
                )?;
            }
            QueryReport::Statistics { statistics } => {
                writeln!(out, "People: {}", statistics.people)?;
                writeln!(out, "Partnerships: {}", statistics.partnerships)?;
                writeln!(out, "Root people: {}", statistics.root_people)?;
                writeln!(out, "Founders: {}", statistics.founders)?;
            }
        }

        Ok(out)
    }
}

fn person_line(person: &PersonSummary) -> String {
    let spouse = if person.is_spouse { " (spouse)" } else { "" };
    format!("{} [{}]{}", person.label(), person.id, spouse)
}

fn partnership_line(partnership: &PartnershipSummary) -> String {
    let parents: Vec<&str> = partnership.parents.iter().map(PersonSummary::label).collect();
    format!(
        "{}: {} -> {} children",
        partnership.id,
        if parents.is_empty() {
            "unknown parents".to_string()
        } else {
            parents.join(" & ")
        },
        partnership.children.len()
    )
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
