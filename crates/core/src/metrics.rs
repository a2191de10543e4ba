//! Derived metrics computed from record lists on every render.
//!
//! Every helper is total: an empty input yields `0` instead of dividing by
//! zero. Percentages and averages round half-up using integer arithmetic, so
//! results never depend on floating-point representation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Partition `records` by `key` and count each bucket.
///
/// Buckets with no records are absent from the map.
pub fn count_by<T, K, F>(records: &[T], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Number of records satisfying `predicate`.
pub fn count_matching<T, F>(records: &[T], predicate: F) -> usize
where
    F: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(r)).count()
}

// ---------------------------------------------------------------------------
// Rates and averages
// ---------------------------------------------------------------------------

/// `round(matching / total * 100)`, rounding half-up.
///
/// `rate(_, 0)` is `0`.
///
/// # Examples
///
/// ```
/// use medclinic_core::metrics::rate;
/// assert_eq!(rate(7, 10), 70);
/// assert_eq!(rate(1, 3), 33);
/// assert_eq!(rate(2, 3), 67);
/// assert_eq!(rate(0, 0), 0);
/// ```
pub fn rate(matching: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (m, t) = (matching as u64, total as u64);
    ((m * 200 + t) / (2 * t)) as u32
}

/// Share of `records` satisfying `predicate`, as a rounded percentage.
pub fn rate_of<T, F>(records: &[T], predicate: F) -> u32
where
    F: Fn(&T) -> bool,
{
    rate(count_matching(records, predicate), records.len())
}

/// Arithmetic mean rounded half-up. An empty slice averages to `0`.
pub fn average_rounded(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let n = values.len() as u64;
    let sum: u64 = values.iter().sum();
    (sum * 2 + n) / (2 * n)
}

// ---------------------------------------------------------------------------
// Score buckets
// ---------------------------------------------------------------------------

/// Lower bound (inclusive) of the "warm" bucket.
pub const WARM_SCORE_THRESHOLD: u8 = 40;

/// Lower bound (inclusive) of the "hot" bucket.
pub const HOT_SCORE_THRESHOLD: u8 = 70;

/// Conversion-likelihood bucket derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    Cold,
    Warm,
    Hot,
}

impl ScoreBucket {
    pub fn from_score(score: u8) -> Self {
        if score >= HOT_SCORE_THRESHOLD {
            ScoreBucket::Hot
        } else if score >= WARM_SCORE_THRESHOLD {
            ScoreBucket::Warm
        } else {
            ScoreBucket::Cold
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- rate ----------------------------------------------------------------

    #[test]
    fn rate_of_empty_total_is_zero() {
        assert_eq!(rate(0, 0), 0);
    }

    #[test]
    fn rate_all_matching_is_hundred() {
        assert_eq!(rate(1, 1), 100);
        assert_eq!(rate(13, 13), 100);
    }

    #[test]
    fn rate_seven_of_ten_is_seventy() {
        assert_eq!(rate(7, 10), 70);
    }

    #[test]
    fn rate_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(rate(1, 8), 13);
        // 1/6 = 16.67%
        assert_eq!(rate(1, 6), 17);
        // 1/7 = 14.29%
        assert_eq!(rate(1, 7), 14);
    }

    #[test]
    fn rate_of_predicate() {
        let values = [1, 2, 3, 4];
        assert_eq!(rate_of(&values, |v| *v % 2 == 0), 50);
        assert_eq!(rate_of::<i32, _>(&[], |_| true), 0);
    }

    // -- average_rounded -----------------------------------------------------

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_rounded(&[]), 0);
    }

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(average_rounded(&[1, 2]), 2);
        assert_eq!(average_rounded(&[10, 20, 35]), 22);
        assert_eq!(average_rounded(&[10, 10, 11]), 10);
    }

    // -- count_by ------------------------------------------------------------

    #[test]
    fn count_by_partitions_records() {
        let statuses = ["taken", "missed", "taken", "pending", "taken"];
        let counts = count_by(&statuses, |s| *s);
        assert_eq!(counts.get("taken"), Some(&3));
        assert_eq!(counts.get("missed"), Some(&1));
        assert_eq!(counts.get("pending"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), statuses.len());
    }

    #[test]
    fn count_by_empty_is_empty() {
        let counts = count_by::<&str, &str, _>(&[], |s| *s);
        assert!(counts.is_empty());
    }

    // -- ScoreBucket ---------------------------------------------------------

    #[test]
    fn score_bucket_boundaries() {
        assert_eq!(ScoreBucket::from_score(0), ScoreBucket::Cold);
        assert_eq!(ScoreBucket::from_score(39), ScoreBucket::Cold);
        assert_eq!(ScoreBucket::from_score(40), ScoreBucket::Warm);
        assert_eq!(ScoreBucket::from_score(69), ScoreBucket::Warm);
        assert_eq!(ScoreBucket::from_score(70), ScoreBucket::Hot);
        assert_eq!(ScoreBucket::from_score(100), ScoreBucket::Hot);
    }
}
