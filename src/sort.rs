/// GridView Stable Sorter
///
/// Orders a sequence with a comparator while keeping the original relative
/// order of records the comparator reports as equal. Each element is decorated
/// with its original position and ties are broken on that position, so the
/// guarantee does not depend on the stability of the underlying sort.
///
/// Repeated re-sorts therefore never swap rows whose keys tie, which keeps
/// already-displayed rows in place between renders.

use crate::comparator::Comparator;
use crate::error::{Result, ViewError};
use crate::record::Record;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Sort `items` by `compare`, breaking ties on original position.
pub fn stable_sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut decorated: Vec<(usize, T)> = items.into_iter().enumerate().collect();
    decorated.sort_unstable_by(|(index_a, a), (index_b, b)| {
        compare(a, b).then_with(|| index_a.cmp(index_b))
    });
    decorated.into_iter().map(|(_, item)| item).collect()
}

/// Sort records with a record comparator.
///
/// Returns the first comparator error encountered, e.g. an invalid sort key.
/// An identity comparator returns the input untouched.
pub fn stable_sort<R>(records: Vec<R>, comparator: &Comparator) -> Result<Vec<R>>
where
    R: Borrow<Record>,
{
    if comparator.is_identity() || records.len() < 2 {
        return Ok(records);
    }

    let mut failure: Option<ViewError> = None;
    let sorted = stable_sort_by(records, |a, b| {
        if failure.is_some() {
            return Ordering::Equal;
        }
        match comparator.compare(Borrow::<Record>::borrow(a), Borrow::<Record>::borrow(b)) {
            Ok(ordering) => ordering,
            Err(err) => {
                failure = Some(err);
                Ordering::Equal
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(sorted),
    }
}
