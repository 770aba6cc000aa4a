use async_trait::async_trait;
use quiz_core::model::{Dataset, UserId, VocabRowError};
use quiz_core::session::LoadFailureKind;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by dataset providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("dataset unavailable: {0}")]
    Unavailable(String),

    #[error("dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid row on line {line}: {source}")]
    InvalidRow {
        line: usize,
        #[source]
        source: VocabRowError,
    },
}

impl DatasetError {
    /// Which blocking error state the session should show for this failure.
    #[must_use]
    pub fn failure_kind(&self) -> LoadFailureKind {
        match self {
            DatasetError::Unavailable(_) => LoadFailureKind::DataUnavailable,
            DatasetError::MissingColumns(_) | DatasetError::InvalidRow { .. } => {
                LoadFailureKind::Schema
            }
        }
    }
}

/// Source of vocabulary rows, addressed by user.
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    /// Fetch the dataset bound to `user`.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Unavailable` if the source cannot be reached or
    /// parsed, and a schema variant if required fields are missing.
    async fn load(&self, user: &UserId) -> Result<Dataset, DatasetError>;
}

/// Fixed user -> dataset map for tests and offline demos.
#[derive(Clone, Default)]
pub struct InMemoryDatasetProvider {
    datasets: Arc<Mutex<HashMap<UserId, Dataset>>>,
}

impl InMemoryDatasetProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            datasets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register or replace the dataset for `user`.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Unavailable` if the backing map is poisoned.
    pub fn insert(&self, user: UserId, dataset: Dataset) -> Result<(), DatasetError> {
        let mut guard = self
            .datasets
            .lock()
            .map_err(|e| DatasetError::Unavailable(e.to_string()))?;
        guard.insert(user, dataset);
        Ok(())
    }

    #[must_use]
    pub fn with_dataset(self, user: UserId, dataset: Dataset) -> Self {
        if let Ok(mut guard) = self.datasets.lock() {
            guard.insert(user, dataset);
        }
        self
    }
}

#[async_trait]
impl DatasetProvider for InMemoryDatasetProvider {
    async fn load(&self, user: &UserId) -> Result<Dataset, DatasetError> {
        let guard = self
            .datasets
            .lock()
            .map_err(|e| DatasetError::Unavailable(e.to_string()))?;
        guard
            .get(user)
            .cloned()
            .ok_or_else(|| DatasetError::Unavailable(format!("no dataset for user {user}")))
    }
}

/// Memoizes successful loads per user for the lifetime of the provider.
///
/// Failures are not cached, so a later selection of the same user refetches.
pub struct CachedDatasetProvider {
    inner: Arc<dyn DatasetProvider>,
    cache: Mutex<HashMap<UserId, Dataset>>,
}

impl CachedDatasetProvider {
    #[must_use]
    pub fn new(inner: Arc<dyn DatasetProvider>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, user: &UserId) -> Result<Option<Dataset>, DatasetError> {
        let guard = self
            .cache
            .lock()
            .map_err(|e| DatasetError::Unavailable(e.to_string()))?;
        Ok(guard.get(user).cloned())
    }
}

#[async_trait]
impl DatasetProvider for CachedDatasetProvider {
    async fn load(&self, user: &UserId) -> Result<Dataset, DatasetError> {
        if let Some(dataset) = self.cached(user)? {
            debug!(%user, rows = dataset.len(), "dataset cache hit");
            return Ok(dataset);
        }

        debug!(%user, "dataset cache miss");
        let dataset = self.inner.load(user).await?;

        let mut guard = self
            .cache
            .lock()
            .map_err(|e| DatasetError::Unavailable(e.to_string()))?;
        // Another load for the same user may have finished first; keep that one.
        Ok(guard.entry(user.clone()).or_insert(dataset).clone())
    }
}
