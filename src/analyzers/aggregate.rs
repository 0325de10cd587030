use crate::analyzers::types::AggregatedGroup;
use crate::dataset::{Season, TripRecord};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Returns the records whose season is in `seasons`, in input order.
///
/// An empty `seasons` set selects nothing.
pub fn filter_by_season<'a>(
    records: &'a [TripRecord],
    seasons: &HashSet<Season>,
) -> Vec<&'a TripRecord> {
    records
        .iter()
        .filter(|r| seasons.contains(&r.season))
        .collect()
}

/// Counts records per key. Keys that no record maps to are never present.
pub fn aggregate_counts<'a, I, K, F>(records: I, key_fn: F) -> HashMap<K, u64>
where
    I: IntoIterator<Item = &'a TripRecord>,
    K: Eq + Hash,
    F: Fn(&'a TripRecord) -> K,
{
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(key_fn(record)).or_insert(0u64) += 1;
    }
    counts
}

/// Ranks groups by count, highest first, and keeps the first `n`.
///
/// Equal counts are ordered by ascending key so the result does not depend
/// on hash map iteration order. Fewer than `n` groups are returned as-is.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `n` is zero.
pub fn top_n<K>(counts: &HashMap<K, u64>, n: usize) -> Result<Vec<AggregatedGroup>>
where
    K: AsRef<str> + Eq + Hash,
{
    if n == 0 {
        return Err(Error::InvalidArgument(
            "top_n requires n >= 1".to_string(),
        ));
    }

    let mut ranked: Vec<(&str, u64)> = counts.iter().map(|(k, c)| (k.as_ref(), *c)).collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);

    Ok(ranked
        .into_iter()
        .map(|(key, trip_count)| AggregatedGroup {
            key: key.to_string(),
            trip_count,
        })
        .collect())
}
