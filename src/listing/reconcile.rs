use std::collections::HashSet;

use crate::domain::School;

/// Append `batch` to `master`, dropping any school whose id was already seen.
/// The first occurrence wins, so schools already in `master` keep their place.
///
/// `batch` is expected newest-first already.
pub fn reconcile(master: &[School], batch: &[School]) -> Vec<School> {
    let mut seen = HashSet::with_capacity(master.len() + batch.len());

    master
        .iter()
        .chain(batch)
        .filter(|school| seen.insert(school.id))
        .cloned()
        .collect()
}
