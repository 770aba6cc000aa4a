use serde::{Deserialize, Serialize};

use crate::model::UserId;

use super::state::{LoadFailure, QuizPhase, SessionState};

/// Notice shown once every row of the bound dataset has been asked.
pub const COMPLETION_MESSAGE: &str = "All questions completed!";

/// Read-only projection of [`SessionState`] handed to presentation sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: QuizPhase,
    pub user: Option<UserId>,
    pub term: Option<String>,
    pub phonetic: String,
    pub example: String,
    pub revealed: bool,
    /// Populated only while the answer is revealed.
    pub answer: Option<String>,
    pub input_text: String,
    pub completion_message: Option<String>,
    pub asked: usize,
    pub total: usize,
    pub loading_user: Option<UserId>,
    pub error: Option<LoadFailure>,
}

impl SessionSnapshot {
    /// True while a question is on screen and can still be answered.
    #[must_use]
    pub fn has_active_question(&self) -> bool {
        matches!(
            self.phase,
            QuizPhase::QuestionHidden | QuizPhase::QuestionRevealed
        )
    }
}

impl SessionState {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let row = self.current_row();
        let revealed = self.revealed();

        SessionSnapshot {
            phase: self.phase(),
            user: self.user().cloned(),
            term: row.map(|row| row.term().to_string()),
            phonetic: row.map(|row| row.phonetic().to_string()).unwrap_or_default(),
            example: row.map(|row| row.example().to_string()).unwrap_or_default(),
            revealed,
            answer: row
                .filter(|_| revealed)
                .map(|row| row.translation().to_string()),
            input_text: self.input_text().to_string(),
            completion_message: (self.phase() == QuizPhase::Exhausted)
                .then(|| COMPLETION_MESSAGE.to_string()),
            asked: self.used_ids().len(),
            total: self.dataset().map_or(0, |dataset| dataset.len()),
            loading_user: self.pending_user().cloned(),
            error: self.last_error().cloned(),
        }
    }
}
