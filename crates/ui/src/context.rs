use std::sync::Arc;

use quiz_core::model::UserId;
use services::QuizService;

pub trait UiApp: Send + Sync {
    fn title(&self) -> String;
    fn users(&self) -> Vec<UserId>;
    fn quiz(&self) -> Arc<QuizService>;
}

#[derive(Clone)]
pub struct AppContext {
    title: String,
    users: Vec<UserId>,
    quiz: Arc<QuizService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            title: app.title(),
            users: app.users(),
            quiz: app.quiz(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Users offered on the selection screen, in display order.
    #[must_use]
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
