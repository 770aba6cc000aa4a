mod dataset;
mod ids;
mod row;

pub use dataset::Dataset;
pub use ids::{RowId, UserId, UserIdError};
pub use row::{VocabRow, VocabRowError};
