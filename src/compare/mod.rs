mod comparator;
mod report;
mod severity;

pub use comparator::{BaselineData, Comparator};
pub use report::{Comparison, ComparisonDetails, ComparisonReport, DimensionDelta};
pub use severity::Severity;
