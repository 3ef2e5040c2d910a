mod detector;
mod ks;
mod state;

pub use detector::DriftDetector;
pub use ks::{kolmogorov_sf, ks_two_sample, KsResult};
pub use state::{ColumnDrift, DriftReport, SkipReason, SkippedColumn};
