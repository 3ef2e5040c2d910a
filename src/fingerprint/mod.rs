mod checksum;
mod stats;

pub use checksum::Fingerprint;
pub(crate) use checksum::sha256;
pub use stats::{round_to_string, NumericSummary};

use crate::dataset::Dataset;

pub fn fingerprint(dataset: &Dataset) -> Fingerprint {
    Fingerprint::compute(dataset)
}
