use thiserror::Error;

use crate::model::{UserIdError, VocabRowError};
use crate::session::SessionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    UserId(#[from] UserIdError),
    #[error(transparent)]
    VocabRow(#[from] VocabRowError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
