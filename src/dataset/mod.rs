mod column;
mod score;
mod table;

pub use column::{Column, DataType, Value};
pub use score::ScoreCard;
pub use table::Dataset;
