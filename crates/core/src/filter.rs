//! Multi-criterion filter engine for list views.
//!
//! A [`FilterState`] combines independent facets:
//!
//! - string-valued categories ([`FilterCategory`]) whose selected values are
//!   OR-combined; a category with nothing selected imposes no constraint;
//! - an inclusive [`ScoreRange`];
//! - an inclusive [`DateRange`];
//! - a free-text query (see [`crate::search`]).
//!
//! All active facets are AND-combined. Filtering is stable: matching records
//! keep their relative order.
//!
//! The state is owned by the caller (usually a view) and passed in by
//! reference; nothing here keeps hidden state between calls.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::search;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// String-valued filter facets known to the list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    Professional,
    Service,
    Channel,
    Status,
    Stage,
    Mode,
}

impl FilterCategory {
    /// Every category, in display order.
    pub const ALL: [FilterCategory; 6] = [
        FilterCategory::Professional,
        FilterCategory::Service,
        FilterCategory::Channel,
        FilterCategory::Status,
        FilterCategory::Stage,
        FilterCategory::Mode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCategory::Professional => "professional",
            FilterCategory::Service => "service",
            FilterCategory::Channel => "channel",
            FilterCategory::Status => "status",
            FilterCategory::Stage => "stage",
            FilterCategory::Mode => "mode",
        }
    }
}

/// A record that can be narrowed by a [`FilterState`].
///
/// Only `category_value` and `search_fields` are required. Records without a
/// score or a date simply never match an active score/date range, and
/// neither does a score above [`MAX_SCORE`].
pub trait Filterable {
    /// The record's value for `category`, or `None` if the record has no
    /// such facet.
    fn category_value(&self, category: FilterCategory) -> Option<&str>;

    /// Fields inspected by the free-text query.
    fn search_fields(&self) -> Vec<&str>;

    fn score(&self) -> Option<u8> {
        None
    }

    fn date(&self) -> Option<NaiveDate> {
        None
    }
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Highest possible lead/record score.
pub const MAX_SCORE: u8 = 100;

/// Inclusive score bounds, `min <= max <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    min: u8,
    max: u8,
}

impl ScoreRange {
    /// The unconstrained range `0..=100`.
    pub const FULL: ScoreRange = ScoreRange {
        min: 0,
        max: MAX_SCORE,
    };

    pub fn new(min: u8, max: u8) -> Result<Self, CoreError> {
        if max > MAX_SCORE {
            return Err(CoreError::Validation(format!(
                "Score upper bound {max} exceeds {MAX_SCORE}"
            )));
        }
        if min > max {
            return Err(CoreError::Validation(format!(
                "Score lower bound {min} is greater than upper bound {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn contains(&self, score: u8) -> bool {
        (self.min..=self.max).contains(&score)
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

#[derive(Deserialize)]
struct ScoreBounds {
    min: u8,
    max: u8,
}

impl<'de> Deserialize<'de> for ScoreRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bounds = ScoreBounds::deserialize(deserializer)?;
        Self::new(bounds.min, bounds.max).map_err(serde::de::Error::custom)
    }
}

/// Inclusive date bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, CoreError> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(CoreError::Validation(format!(
                    "Start date {f} is after end date {t}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |f| date >= f) && self.to.map_or(true, |t| date <= t)
    }

    /// Both sides open.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

#[derive(Deserialize)]
struct DateBounds {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bounds = DateBounds::deserialize(deserializer)?;
        Self::new(bounds.from, bounds.to).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// The active filter configuration of one list view.
///
/// Invariant: `selections` never stores an empty set, so two states that
/// select the same values compare equal regardless of toggle history.
/// Deserialization goes through the setters and keeps the invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    selections: BTreeMap<FilterCategory, BTreeSet<String>>,
    score: Option<ScoreRange>,
    dates: Option<DateRange>,
    query: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to `category` if absent, remove it if present.
    ///
    /// Returns `true` when the value is selected after the call.
    pub fn toggle(&mut self, category: FilterCategory, value: impl Into<String>) -> bool {
        let value = value.into();
        let set = self.selections.entry(category).or_default();
        let selected = if set.remove(&value) {
            false
        } else {
            set.insert(value);
            true
        };
        if set.is_empty() {
            self.selections.remove(&category);
        }
        selected
    }

    /// Select every value in `values` for `category`, replacing any previous
    /// selection. An empty iterator clears the category.
    pub fn set_category<I, S>(&mut self, category: FilterCategory, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            self.selections.remove(&category);
        } else {
            self.selections.insert(category, set);
        }
    }

    pub fn is_selected(&self, category: FilterCategory, value: &str) -> bool {
        self.selections
            .get(&category)
            .is_some_and(|set| set.contains(value))
    }

    /// Selected values of `category` in sorted order.
    pub fn selected(&self, category: FilterCategory) -> Vec<&str> {
        self.selections
            .get(&category)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn clear_category(&mut self, category: FilterCategory) {
        self.selections.remove(&category);
    }

    /// Set the score range. `None` or [`ScoreRange::FULL`] removes the
    /// constraint.
    pub fn set_score_range(&mut self, range: Option<ScoreRange>) {
        self.score = range.filter(|r| !r.is_full());
    }

    pub fn score_range(&self) -> Option<ScoreRange> {
        self.score
    }

    /// Set the date range. `None` or a range open on both sides removes the
    /// constraint.
    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.dates = range.filter(|r| !r.is_unbounded());
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.dates
    }

    /// Set the free-text query. Blank input clears it.
    pub fn set_query(&mut self, query: &str) {
        self.query = search::normalize_query(query);
    }

    /// The normalized (trimmed, lowercased) query, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Reset every facet. Equivalent to "show all".
    pub fn clear_all(&mut self) {
        self.selections.clear();
        self.score = None;
        self.dates = None;
        self.query = None;
    }

    /// `true` when no facet constrains anything.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
            && self.score.is_none()
            && self.dates.is_none()
            && self.query.is_none()
    }

    /// Number shown on the "filters" badge: one per selected value plus one
    /// per active range or query.
    pub fn active_filter_count(&self) -> usize {
        let values: usize = self.selections.values().map(BTreeSet::len).sum();
        values
            + usize::from(self.score.is_some())
            + usize::from(self.dates.is_some())
            + usize::from(self.query.is_some())
    }

    /// Check a single record against every active facet.
    pub fn matches<T: Filterable + ?Sized>(&self, record: &T) -> bool {
        let categories_ok = self.selections.iter().all(|(category, allowed)| {
            record
                .category_value(*category)
                .is_some_and(|value| allowed.contains(value))
        });
        if !categories_ok {
            return false;
        }

        if let Some(range) = self.score {
            if !record.score().is_some_and(|s| range.contains(s)) {
                return false;
            }
        }

        if let Some(range) = self.dates {
            if !record.date().is_some_and(|d| range.contains(d)) {
                return false;
            }
        }

        match &self.query {
            Some(needle) => search::matches_normalized(needle, &record.search_fields()),
            None => true,
        }
    }

    /// Stable filter of `records` by this state.
    pub fn apply<'a, T: Filterable>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Indices into `records` of the matching records, in order.
    pub fn matching_indices<T: Filterable>(&self, records: &[T]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(*r))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct FilterStateFields {
    selections: BTreeMap<FilterCategory, BTreeSet<String>>,
    score: Option<ScoreRange>,
    dates: Option<DateRange>,
    query: Option<String>,
}

impl<'de> Deserialize<'de> for FilterState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = FilterStateFields::deserialize(deserializer)?;
        let mut state = FilterState::new();
        for (category, values) in fields.selections {
            state.set_category(category, values);
        }
        state.set_score_range(fields.score);
        state.set_date_range(fields.dates);
        if let Some(query) = fields.query {
            state.set_query(&query);
        }
        Ok(state)
    }
}

/// Count how many records carry each value of `category`.
///
/// Records without a value for the category are skipped. Used for the
/// counters shown next to filter chips.
pub fn facet_counts<T: Filterable>(
    records: &[T],
    category: FilterCategory,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in records.iter().filter_map(|r| r.category_value(category)) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        professional: &'static str,
        status: &'static str,
        score: Option<u8>,
        date: Option<NaiveDate>,
    }

    impl Filterable for Row {
        fn category_value(&self, category: FilterCategory) -> Option<&str> {
            match category {
                FilterCategory::Professional => Some(self.professional),
                FilterCategory::Status => Some(self.status),
                _ => None,
            }
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.professional]
        }

        fn score(&self) -> Option<u8> {
            self.score
        }

        fn date(&self) -> Option<NaiveDate> {
            self.date
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn row(
        name: &'static str,
        professional: &'static str,
        status: &'static str,
        score: Option<u8>,
        date: Option<NaiveDate>,
    ) -> Row {
        Row {
            name,
            professional,
            status,
            score,
            date,
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row("Ana Souza", "Dr. Silva", "active", Some(85), Some(day(1))),
            row("Bruno Lima", "Dra. Costa", "inactive", Some(40), Some(day(5))),
            row("Carla Dias", "Dr. Silva", "inactive", Some(10), Some(day(10))),
            row("Diego Reis", "Dr. Mendes", "active", None, None),
        ]
    }

    fn names(result: &[&Row]) -> Vec<&'static str> {
        result.iter().map(|r| r.name).collect()
    }

    // -- toggle --------------------------------------------------------------

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = FilterState::new();
        assert!(state.toggle(FilterCategory::Professional, "Dr. Silva"));
        assert!(state.is_selected(FilterCategory::Professional, "Dr. Silva"));
        assert!(!state.toggle(FilterCategory::Professional, "Dr. Silva"));
        assert!(!state.is_selected(FilterCategory::Professional, "Dr. Silva"));
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Status, "active");
        let original = state.clone();

        state.toggle(FilterCategory::Professional, "Dr. Silva");
        state.toggle(FilterCategory::Professional, "Dr. Silva");
        assert_eq!(state, original);

        state.toggle(FilterCategory::Status, "inactive");
        state.toggle(FilterCategory::Status, "inactive");
        assert_eq!(state, original);
    }

    #[test]
    fn removing_last_value_leaves_no_empty_category() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Stage, "won");
        state.toggle(FilterCategory::Stage, "won");
        assert!(state.is_empty());
        assert_eq!(state, FilterState::new());
    }

    // -- apply ---------------------------------------------------------------

    #[test]
    fn empty_state_returns_every_record_in_order() {
        let data = rows();
        let result = FilterState::new().apply(&data);
        assert_eq!(result.len(), data.len());
        assert_eq!(
            names(&result),
            vec!["Ana Souza", "Bruno Lima", "Carla Dias", "Diego Reis"]
        );
    }

    #[test]
    fn values_within_category_are_or_combined() {
        let data = rows();
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Professional, "Dr. Silva");
        state.toggle(FilterCategory::Professional, "Dr. Mendes");
        assert_eq!(
            names(&state.apply(&data)),
            vec!["Ana Souza", "Carla Dias", "Diego Reis"]
        );
    }

    #[test]
    fn categories_are_and_combined() {
        let data = rows();
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Professional, "Dr. Silva");
        state.toggle(FilterCategory::Status, "inactive");

        let combined = state.apply(&data);

        let mut only_prof = FilterState::new();
        only_prof.toggle(FilterCategory::Professional, "Dr. Silva");
        let mut only_status = FilterState::new();
        only_status.toggle(FilterCategory::Status, "inactive");
        let by_prof = only_prof.apply(&data);
        let by_status = only_status.apply(&data);

        let intersection: Vec<&Row> = by_prof
            .iter()
            .copied()
            .filter(|r| by_status.contains(r))
            .collect();
        assert_eq!(combined, intersection);
        assert_eq!(names(&combined), vec!["Carla Dias"]);
    }

    #[test]
    fn record_without_category_value_is_excluded_when_category_active() {
        let data = rows();
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Channel, "email");
        assert!(state.apply(&data).is_empty());
    }

    #[test]
    fn score_range_is_inclusive_on_both_ends() {
        let data = rows();
        let mut state = FilterState::new();
        state.set_score_range(Some(ScoreRange::new(40, 85).unwrap()));
        assert_eq!(names(&state.apply(&data)), vec!["Ana Souza", "Bruno Lima"]);
    }

    #[test]
    fn full_score_range_is_no_constraint() {
        let data = rows();
        let mut state = FilterState::new();
        state.set_score_range(Some(ScoreRange::FULL));
        assert!(state.score_range().is_none());
        assert_eq!(state.apply(&data).len(), 4);
    }

    #[test]
    fn date_range_is_inclusive_and_may_be_open() {
        let data = rows();
        let mut state = FilterState::new();
        state.set_date_range(Some(DateRange::new(Some(day(5)), Some(day(10))).unwrap()));
        assert_eq!(names(&state.apply(&data)), vec!["Bruno Lima", "Carla Dias"]);

        state.set_date_range(Some(DateRange::new(None, Some(day(4))).unwrap()));
        assert_eq!(names(&state.apply(&data)), vec!["Ana Souza"]);
    }

    #[test]
    fn query_is_and_combined_with_categories() {
        let data = rows();
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Status, "active");
        state.set_query("  DIEGO ");
        assert_eq!(names(&state.apply(&data)), vec!["Diego Reis"]);
    }

    #[test]
    fn blank_query_clears_search() {
        let mut state = FilterState::new();
        state.set_query("ana");
        state.set_query("   ");
        assert!(state.query().is_none());
    }

    #[test]
    fn matching_indices_follow_record_order() {
        let data = rows();
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Status, "inactive");
        assert_eq!(state.matching_indices(&data), vec![1, 2]);
    }

    // -- clear_all / counters -----------------------------------------------

    #[test]
    fn clear_all_shows_everything() {
        let data = rows();
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Status, "active");
        state.set_query("ana");
        state.set_score_range(Some(ScoreRange::new(50, 100).unwrap()));
        state.clear_all();
        assert!(state.is_empty());
        assert_eq!(state.apply(&data).len(), data.len());
    }

    #[test]
    fn active_filter_count_counts_values_and_ranges() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Professional, "Dr. Silva");
        state.toggle(FilterCategory::Professional, "Dra. Costa");
        state.toggle(FilterCategory::Status, "active");
        state.set_query("x");
        assert_eq!(state.active_filter_count(), 4);
    }

    #[test]
    fn set_category_replaces_selection() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Mode, "telemedicine");
        state.set_category(FilterCategory::Mode, ["in_person"]);
        assert_eq!(state.selected(FilterCategory::Mode), vec!["in_person"]);
        state.set_category(FilterCategory::Mode, Vec::<String>::new());
        assert!(state.is_empty());
    }

    #[test]
    fn facet_counts_group_by_value() {
        let counts = facet_counts(&rows(), FilterCategory::Professional);
        assert_eq!(counts.get("Dr. Silva"), Some(&2));
        assert_eq!(counts.get("Dra. Costa"), Some(&1));
        assert_eq!(counts.get("Dr. Mendes"), Some(&1));
    }

    // -- ranges --------------------------------------------------------------

    #[test]
    fn score_range_rejects_inverted_bounds() {
        assert_matches!(ScoreRange::new(60, 20), Err(CoreError::Validation(_)));
    }

    #[test]
    fn score_range_rejects_upper_bound_above_max() {
        assert_matches!(ScoreRange::new(0, 101), Err(CoreError::Validation(_)));
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        assert_matches!(
            DateRange::new(Some(day(9)), Some(day(2))),
            Err(CoreError::Validation(_))
        );
    }

    // -- serde ---------------------------------------------------------------

    #[test]
    fn deserialized_empty_category_imposes_no_constraint() {
        let data = rows();
        let state: FilterState =
            serde_json::from_str(r#"{"selections":{"status":[]},"query":null}"#).unwrap();

        assert!(state.is_empty());
        assert_eq!(state.active_filter_count(), 0);
        assert_eq!(state, FilterState::new());
        assert_eq!(state.apply(&data).len(), data.len());
    }

    #[test]
    fn deserialized_state_is_normalized() {
        let state: FilterState = serde_json::from_str(
            r#"{"score":{"min":0,"max":100},"dates":{"from":null,"to":null},"query":"  ANA "}"#,
        )
        .unwrap();

        assert!(state.score_range().is_none());
        assert!(state.date_range().is_none());
        assert_eq!(state.query(), Some("ana"));
        assert_eq!(state.active_filter_count(), 1);
    }

    #[test]
    fn filter_state_survives_serde_round_trip() {
        let mut state = FilterState::new();
        state.toggle(FilterCategory::Professional, "Dr. Silva");
        state.set_score_range(Some(ScoreRange::new(40, 85).unwrap()));
        state.set_query("ana");

        let json = serde_json::to_string(&state).unwrap();
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn deserializing_inverted_score_range_fails() {
        assert!(serde_json::from_str::<ScoreRange>(r#"{"min":90,"max":10}"#).is_err());
        assert!(serde_json::from_str::<ScoreRange>(r#"{"min":0,"max":150}"#).is_err());
        let state = serde_json::from_str::<FilterState>(r#"{"score":{"min":90,"max":10}}"#);
        assert!(state.is_err());
    }

    #[test]
    fn deserializing_inverted_date_range_fails() {
        let json = r#"{"from":"2024-03-09","to":"2024-03-02"}"#;
        assert!(serde_json::from_str::<DateRange>(json).is_err());
    }

    #[test]
    fn score_above_max_never_matches_a_range() {
        let data = vec![row("Eva Prado", "Dr. Silva", "active", Some(150), None)];
        let mut state = FilterState::new();
        state.set_score_range(Some(ScoreRange::new(50, 100).unwrap()));
        assert!(state.apply(&data).is_empty());
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&FilterCategory::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
    }
}
