mod snapshot;
mod state;

pub use snapshot::{COMPLETION_MESSAGE, SessionSnapshot};
pub use state::{
    LoadFailure, LoadFailureKind, QuizPhase, SelectionTicket, SessionError, SessionState,
};
