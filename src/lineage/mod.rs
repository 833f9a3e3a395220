pub mod partnership;
pub mod person;
pub mod roots;
pub mod traversal;

pub use partnership::Partnership;
pub use person::Person;
pub use roots::Roots;
pub use traversal::AncestryTraversal;
