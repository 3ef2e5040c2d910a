mod lock;
mod record;
mod row;
mod store;

pub use record::{VersionRecord, VersionRecordBuilder};
pub use row::HistoryTableRow;
pub use store::{SaveOutcome, VersionStore};
