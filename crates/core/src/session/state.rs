use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Dataset, RowId, UserId, VocabRow};
use crate::selector::{Pick, pick};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no user selected")]
    NoUserSelected,

    #[error("selection of {user} was superseded by a newer selection")]
    StaleSelection { user: UserId },
}

//
// ─── PHASES & FAILURES ─────────────────────────────────────────────────────────
//

/// Interaction state of the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    AwaitingUser,
    QuestionHidden,
    QuestionRevealed,
    /// No unseen rows remain for the bound user. Left only by a new selection.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailureKind {
    DataUnavailable,
    Schema,
}

/// Why the most recent selection could not bind a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    pub user: UserId,
    pub kind: LoadFailureKind,
    pub message: String,
}

/// Handle for a selection whose dataset is still being fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    user: UserId,
}

impl SelectionTicket {
    #[must_use]
    pub fn user(&self) -> &UserId {
        &self.user
    }
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct Binding {
    user: UserId,
    dataset: Dataset,
}

/// Mutable record of one quiz session.
///
/// All transitions take `&mut self`; the owner is expected to apply one event
/// at a time. The random source is passed to every transition that draws.
pub struct SessionState {
    binding: Option<Binding>,
    used: HashSet<RowId>,
    current: Option<RowId>,
    phase: QuizPhase,
    input_text: String,
    pending: Option<SelectionTicket>,
    generation: u64,
    last_error: Option<LoadFailure>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            binding: None,
            used: HashSet::new(),
            current: None,
            phase: QuizPhase::AwaitingUser,
            input_text: String::new(),
            pending: None,
            generation: 0,
            last_error: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserId> {
        self.binding.as_ref().map(|binding| &binding.user)
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.binding.as_ref().map(|binding| &binding.dataset)
    }

    #[must_use]
    pub fn used_ids(&self) -> &HashSet<RowId> {
        &self.used
    }

    #[must_use]
    pub fn current_id(&self) -> Option<RowId> {
        self.current
    }

    #[must_use]
    pub fn current_row(&self) -> Option<&VocabRow> {
        let id = self.current?;
        self.dataset()?.get(id)
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.phase == QuizPhase::QuestionRevealed
    }

    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// User whose dataset is currently being fetched, if any.
    #[must_use]
    pub fn pending_user(&self) -> Option<&UserId> {
        self.pending.as_ref().map(SelectionTicket::user)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&LoadFailure> {
        self.last_error.as_ref()
    }

    /// Bind `dataset` to `user` and draw the first question.
    ///
    /// Cancels any pending selection.
    pub fn select_user<R: Rng + ?Sized>(
        &mut self,
        user: UserId,
        dataset: Dataset,
        rng: &mut R,
    ) -> QuizPhase {
        self.pending = None;
        self.bind(user, dataset, rng)
    }

    /// Start a selection whose dataset arrives later.
    ///
    /// The returned ticket supersedes every ticket issued before it.
    pub fn begin_selection(&mut self, user: UserId) -> SelectionTicket {
        self.generation += 1;
        self.last_error = None;
        let ticket = SelectionTicket {
            generation: self.generation,
            user,
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    /// Finish a selection started with [`Self::begin_selection`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleSelection` if a newer selection was started
    /// (or completed) since this ticket was issued. State is left untouched.
    pub fn complete_selection<R: Rng + ?Sized>(
        &mut self,
        ticket: SelectionTicket,
        dataset: Dataset,
        rng: &mut R,
    ) -> Result<QuizPhase, SessionError> {
        self.take_pending(ticket)
            .map(|user| self.bind(user, dataset, rng))
    }

    /// Record that the dataset for `ticket` could not be loaded.
    ///
    /// The session returns to `AwaitingUser` with nothing bound.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleSelection` if the ticket was superseded.
    pub fn fail_selection(
        &mut self,
        ticket: SelectionTicket,
        kind: LoadFailureKind,
        message: impl Into<String>,
    ) -> Result<(), SessionError> {
        let user = self.take_pending(ticket)?;
        self.binding = None;
        self.used.clear();
        self.current = None;
        self.input_text.clear();
        self.phase = QuizPhase::AwaitingUser;
        self.last_error = Some(LoadFailure {
            user,
            kind,
            message: message.into(),
        });
        Ok(())
    }

    /// Abandon `ticket` if it is still the pending selection.
    ///
    /// The bound user, if any, is kept. Returns `false` when a newer selection
    /// has already replaced the ticket.
    pub fn cancel_selection(&mut self, ticket: &SelectionTicket) -> bool {
        if self.pending.as_ref() != Some(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Reveal the answer, or move on once it is revealed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoUserSelected` before any user is bound.
    pub fn confirm<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<QuizPhase, SessionError> {
        match self.phase {
            QuizPhase::AwaitingUser => return Err(SessionError::NoUserSelected),
            QuizPhase::QuestionHidden => self.phase = QuizPhase::QuestionRevealed,
            QuizPhase::QuestionRevealed => {
                self.advance(rng);
            }
            QuizPhase::Exhausted => {}
        }
        Ok(self.phase)
    }

    /// Store the user's in-progress guess. Never affects question selection.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    fn take_pending(&mut self, ticket: SelectionTicket) -> Result<UserId, SessionError> {
        if self.pending.as_ref() != Some(&ticket) {
            return Err(SessionError::StaleSelection { user: ticket.user });
        }
        self.pending = None;
        Ok(ticket.user)
    }

    fn bind<R: Rng + ?Sized>(&mut self, user: UserId, dataset: Dataset, rng: &mut R) -> QuizPhase {
        self.binding = Some(Binding { user, dataset });
        self.used.clear();
        self.current = None;
        self.input_text.clear();
        self.last_error = None;
        self.advance(rng)
    }

    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> QuizPhase {
        let Some(binding) = self.binding.as_ref() else {
            self.phase = QuizPhase::AwaitingUser;
            return self.phase;
        };

        match pick(&binding.dataset, &self.used, rng) {
            Pick::Row(id) => {
                self.used.insert(id);
                self.current = Some(id);
                self.input_text.clear();
                self.phase = QuizPhase::QuestionHidden;
            }
            Pick::Exhausted => self.phase = QuizPhase::Exhausted,
        }
        self.phase
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("user", &self.user())
            .field("dataset_len", &self.dataset().map(Dataset::len))
            .field("used_len", &self.used.len())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("pending", &self.pending_user())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
