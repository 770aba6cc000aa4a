use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::UserId;
use quiz_core::session::{SelectionTicket, SessionSnapshot, SessionState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::{CachedDatasetProvider, DatasetProvider};
use tracing::{debug, info, warn};

use crate::error::QuizError;

struct Inner {
    session: SessionState,
    rng: StdRng,
}

/// Withdraws a pending selection if its future is dropped before the
/// dataset arrives, e.g. when an HTTP client disconnects mid-fetch.
struct PendingSelection<'a> {
    service: &'a QuizService,
    ticket: SelectionTicket,
    armed: bool,
}

impl PendingSelection<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSelection<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if self.service.lock().session.cancel_selection(&self.ticket) {
            debug!(user = %self.ticket.user(), "selection dropped before its dataset arrived");
        }
    }
}

/// Single-writer controller around one quiz session.
///
/// Every event runs to completion under the session lock. The lock is never
/// held while a dataset is being fetched; a selection started later wins over
/// any fetch still in flight.
#[derive(Clone)]
pub struct QuizService {
    provider: Arc<dyn DatasetProvider>,
    inner: Arc<Mutex<Inner>>,
}

impl QuizService {
    #[must_use]
    pub fn new(provider: Arc<dyn DatasetProvider>) -> Self {
        Self::with_rng(provider, StdRng::from_os_rng())
    }

    /// Use a caller-supplied random source, e.g. a seeded one in tests.
    #[must_use]
    pub fn with_rng(provider: Arc<dyn DatasetProvider>, rng: StdRng) -> Self {
        Self {
            provider,
            inner: Arc::new(Mutex::new(Inner {
                session: SessionState::new(),
                rng,
            })),
        }
    }

    /// Wrap `provider` so each user's dataset is fetched at most once.
    #[must_use]
    pub fn cached(provider: Arc<dyn DatasetProvider>) -> Self {
        Self::new(Arc::new(CachedDatasetProvider::new(provider)))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().session.snapshot()
    }

    /// Bind `user`'s dataset and draw the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Dataset` if the dataset could not be loaded; the
    /// session then shows the failure and awaits a new selection.
    /// Returns a superseded `QuizError::Session` if another selection was
    /// started while this one was loading; state is left to the newer one.
    pub async fn select_user(&self, user: UserId) -> Result<SessionSnapshot, QuizError> {
        let ticket = self.lock().session.begin_selection(user.clone());
        let pending = PendingSelection {
            service: self,
            ticket: ticket.clone(),
            armed: true,
        };
        info!(%user, "loading dataset");

        let loaded = self.provider.load(&user).await;
        pending.disarm();

        let mut guard = self.lock();
        let Inner { session, rng } = &mut *guard;
        match loaded {
            Ok(dataset) => {
                let rows = dataset.len();
                match session.complete_selection(ticket, dataset, rng) {
                    Ok(phase) => {
                        info!(%user, rows, ?phase, "user selected");
                        Ok(session.snapshot())
                    }
                    Err(err) => {
                        debug!(%user, "discarding superseded dataset");
                        Err(err.into())
                    }
                }
            }
            Err(err) => {
                if let Err(stale) =
                    session.fail_selection(ticket, err.failure_kind(), err.to_string())
                {
                    debug!(%user, error = %err, "discarding superseded load failure");
                    return Err(stale.into());
                }
                warn!(%user, error = %err, "dataset load failed");
                Err(err.into())
            }
        }
    }

    /// Reveal the current answer, or advance once it is revealed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` when no user has been selected.
    pub fn confirm(&self) -> Result<SessionSnapshot, QuizError> {
        let mut guard = self.lock();
        let Inner { session, rng } = &mut *guard;
        let phase = session.confirm(rng)?;
        debug!(?phase, asked = session.used_ids().len(), "confirm");
        Ok(session.snapshot())
    }

    /// Echo the user's typed guess into the session.
    pub fn set_input_text(&self, text: impl Into<String>) -> SessionSnapshot {
        let mut guard = self.lock();
        guard.session.set_input_text(text);
        guard.session.snapshot()
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("session", &self.lock().session)
            .finish_non_exhaustive()
    }
}
