pub mod formatters;
pub mod generator;
pub mod report;

pub use formatters::{JsonFormatter, ReportFormatter, TextFormatter};
pub use generator::ReportGenerator;
pub use report::{PartnershipSummary, PersonSummary, QueryReport};
