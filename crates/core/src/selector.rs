use std::collections::HashSet;

use rand::Rng;

use crate::model::{Dataset, RowId};

/// Outcome of drawing the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Row(RowId),
    /// Every row of the dataset has already been asked.
    Exhausted,
}

/// Draw one unseen row uniformly at random.
///
/// Candidates are the dataset ids not present in `used`, enumerated in
/// ascending order, so a seeded `rng` gives reproducible draws.
///
/// # Examples
///
/// ```
/// # use std::collections::HashSet;
/// # use quiz_core::model::{Dataset, RowId, VocabRow};
/// # use quiz_core::selector::{pick, Pick};
/// let dataset = Dataset::new(vec![VocabRow::new("ephemeral", "短暫的").unwrap()]);
/// let mut rng = rand::rng();
/// let mut used = HashSet::new();
/// assert_eq!(pick(&dataset, &used, &mut rng), Pick::Row(RowId::new(0)));
/// used.insert(RowId::new(0));
/// assert_eq!(pick(&dataset, &used, &mut rng), Pick::Exhausted);
/// ```
pub fn pick<R: Rng + ?Sized>(dataset: &Dataset, used: &HashSet<RowId>, rng: &mut R) -> Pick {
    let available: Vec<RowId> = dataset.ids().filter(|id| !used.contains(id)).collect();
    if available.is_empty() {
        return Pick::Exhausted;
    }
    Pick::Row(available[rng.random_range(0..available.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VocabRow;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dataset(len: usize) -> Dataset {
        (0..len)
            .map(|i| VocabRow::new(format!("term-{i}"), format!("t-{i}")).unwrap())
            .collect()
    }

    #[test]
    fn empty_dataset_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&dataset(0), &HashSet::new(), &mut rng), Pick::Exhausted);
    }

    #[test]
    fn never_returns_used_ids() {
        let data = dataset(5);
        let used: HashSet<_> = [0, 1, 3, 4].into_iter().map(RowId::new).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(pick(&data, &used, &mut rng), Pick::Row(RowId::new(2)));
        }
    }

    #[test]
    fn same_seed_gives_same_draw() {
        let data = dataset(20);
        let used = HashSet::new();
        let a = pick(&data, &used, &mut StdRng::seed_from_u64(99));
        let b = pick(&data, &used, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn every_remaining_id_can_be_drawn() {
        let data = dataset(4);
        let used: HashSet<_> = std::iter::once(RowId::new(0)).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            if let Pick::Row(id) = pick(&data, &used, &mut rng) {
                seen.insert(id);
            }
        }
        let expected: HashSet<_> = [1, 2, 3].into_iter().map(RowId::new).collect();
        assert_eq!(seen, expected);
    }
}
