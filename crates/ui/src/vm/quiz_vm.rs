use quiz_core::model::UserId;
use quiz_core::session::{LoadFailure, LoadFailureKind, QuizPhase, SessionSnapshot};

/// Which screen the quiz view should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    SelectUser,
    Loading,
    Failed,
    Question,
    Completed,
}

/// User actions the quiz view dispatches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectUser(UserId),
    Input(String),
    Confirm,
    SwitchUser,
}

/// Display model over a session snapshot plus the view's local flags.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    snapshot: SessionSnapshot,
    switching: bool,
    loading: Option<UserId>,
}

impl QuizVm {
    #[must_use]
    pub fn new(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot,
            switching: false,
            loading: None,
        }
    }

    /// The user asked to pick someone else; show the list over the question.
    #[must_use]
    pub fn with_switching(mut self, switching: bool) -> Self {
        self.switching = switching;
        self
    }

    /// A selection was issued by this view and has not settled yet.
    #[must_use]
    pub fn with_loading(mut self, loading: Option<UserId>) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        if self.loading_user().is_some() {
            return QuizScreen::Loading;
        }
        if self.switching {
            return QuizScreen::SelectUser;
        }
        if self.snapshot.error.is_some() {
            return QuizScreen::Failed;
        }
        if self.snapshot.has_active_question() {
            return QuizScreen::Question;
        }
        match self.snapshot.phase {
            QuizPhase::Exhausted => QuizScreen::Completed,
            _ => QuizScreen::SelectUser,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserId> {
        self.snapshot.user.as_ref()
    }

    #[must_use]
    pub fn loading_user(&self) -> Option<&UserId> {
        self.snapshot.loading_user.as_ref().or(self.loading.as_ref())
    }

    #[must_use]
    pub fn heading(&self, title: &str) -> String {
        match self.user() {
            Some(user) if !self.switching => format!("{title} · {user}"),
            _ => title.to_string(),
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        self.snapshot.term.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn phonetic(&self) -> Option<&str> {
        Some(self.snapshot.phonetic.as_str()).filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn example(&self) -> Option<&str> {
        Some(self.snapshot.example.as_str()).filter(|text| !text.is_empty())
    }

    /// Present only while the answer is revealed.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.snapshot.answer.as_deref()
    }

    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.snapshot.input_text
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.snapshot.asked, self.snapshot.total)
    }

    #[must_use]
    pub fn completion_message(&self) -> &str {
        self.snapshot.completion_message.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn loading_label(&self) -> String {
        self.loading_user().map_or_else(
            || "Loading...".to_string(),
            |user| format!("Loading words for {user}..."),
        )
    }

    #[must_use]
    pub fn failure(&self) -> Option<&LoadFailure> {
        self.snapshot.error.as_ref()
    }

    #[must_use]
    pub fn failure_label(&self) -> Option<String> {
        self.failure().map(|failure| match failure.kind {
            LoadFailureKind::DataUnavailable => {
                format!("Could not load words for {}.", failure.user)
            }
            LoadFailureKind::Schema => {
                format!("The word list for {} is not in the expected format.", failure.user)
            }
        })
    }
}
