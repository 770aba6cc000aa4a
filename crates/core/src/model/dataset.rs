use std::sync::Arc;

use crate::model::{RowId, VocabRow};

/// Ordered, immutable collection of rows bound to one user.
///
/// Clones share the same row storage, so a cached dataset and the session
/// holding it never copy rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    rows: Arc<[VocabRow]>,
}

impl Dataset {
    #[must_use]
    pub fn new(rows: Vec<VocabRow>) -> Self {
        Self { rows: rows.into() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: RowId) -> Option<&VocabRow> {
        self.rows.get(id.index())
    }

    /// All row identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        (0..self.rows.len()).map(RowId::new)
    }
}

impl FromIterator<VocabRow> for Dataset {
    fn from_iter<I: IntoIterator<Item = VocabRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
