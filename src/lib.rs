pub mod error;
pub mod config;
pub mod dataset;
pub mod fingerprint;
pub mod version;
pub mod drift;
pub mod compare;

pub use error::{TabDriftError, Result};
pub use config::IntegrityConfig;
pub use dataset::{Column, DataType, Dataset, ScoreCard, Value};
pub use fingerprint::{fingerprint, Fingerprint, NumericSummary};
pub use version::{HistoryTableRow, SaveOutcome, VersionRecord, VersionRecordBuilder, VersionStore};
pub use drift::{ColumnDrift, DriftDetector, DriftReport, SkipReason, SkippedColumn};
pub use compare::{BaselineData, Comparator, Comparison, ComparisonDetails, ComparisonReport, DimensionDelta, Severity};
