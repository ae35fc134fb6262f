//! Fuzzy search and compound filtering over processed records.
//!
//! The index is an explicit owned value built per call site — never a
//! module-level singleton — so test runs and concurrent site builds cannot
//! cross-talk through shared state. The filter set is evaluated as a
//! logical AND of every active filter; a filter whose required input is
//! unavailable (no caller location) is skipped, not an error.

use bookdir_core::app_config::{DEFAULT_FUZZY_THRESHOLD, DEFAULT_LATE_HOUR};
use bookdir_core::{parse_day_schedule, Coordinates, DaySchedule, ProcessedBookstore, WeekHours};
use chrono::Timelike;

use crate::geo::haversine_km;
use crate::provinces::normalize_province;

/// Fuzzy-match index over name, address, city, and province.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    /// Lowercased haystacks per record, parallel to the record list the
    /// index was built from.
    entries: Vec<[String; 4]>,
    threshold: f64,
}

impl SearchIndex {
    /// Build an index with the default match threshold.
    #[must_use]
    pub fn build(records: &[ProcessedBookstore]) -> Self {
        Self::with_threshold(records, DEFAULT_FUZZY_THRESHOLD)
    }

    /// Build an index with an explicit Jaro-Winkler threshold. Looser than
    /// exact substring matching, tighter than anything-goes: the default
    /// tolerates one or two character typos without admitting unrelated
    /// names.
    #[must_use]
    pub fn with_threshold(records: &[ProcessedBookstore], threshold: f64) -> Self {
        let entries = records
            .iter()
            .map(|r| {
                [
                    r.name.to_lowercase(),
                    r.address.to_lowercase(),
                    r.city.to_lowercase(),
                    r.province.to_lowercase(),
                ]
            })
            .collect();
        Self { entries, threshold }
    }

    /// Fuzzy search over the record list this index was built from.
    ///
    /// An empty (or whitespace) query returns every record in original,
    /// unranked order. A non-empty query returns records whose best field
    /// score meets the threshold, ranked by score descending with ties in
    /// original order.
    #[must_use]
    pub fn search<'a>(
        &self,
        records: &'a [ProcessedBookstore],
        query: &str,
    ) -> Vec<&'a ProcessedBookstore> {
        debug_assert_eq!(records.len(), self.entries.len());

        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return records.iter().collect();
        }

        let mut scored: Vec<(f64, &ProcessedBookstore)> = records
            .iter()
            .zip(&self.entries)
            .filter_map(|(record, haystacks)| {
                let score = haystacks
                    .iter()
                    .map(|h| field_score(&query, h))
                    .fold(0.0_f64, f64::max);
                (score >= self.threshold).then_some((score, record))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, record)| record).collect()
    }
}

/// Best Jaro-Winkler score of the query against the whole field and against
/// each whitespace token, so `"bellwood"` still matches the name
/// `"Bellwoods Books"`.
fn field_score(query: &str, haystack: &str) -> f64 {
    let whole = strsim::jaro_winkler(query, haystack);
    haystack
        .split_whitespace()
        .map(|token| strsim::jaro_winkler(query, token))
        .fold(whole, f64::max)
}

/// Compound filter set; every active filter must pass.
#[derive(Debug, Clone, Default)]
pub struct StoreFilters {
    pub open_now: bool,
    pub has_website: bool,
    pub min_rating: Option<f64>,
    /// Compared after province normalization.
    pub province: Option<String>,
    pub price_level: Option<String>,
    pub max_distance_km: Option<f64>,
    pub open_late: bool,
    pub open_weekends: bool,
}

/// Ambient inputs the filters need, made explicit so filtering stays a pure
/// function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    pub weekday: chrono::Weekday,
    /// Minutes since local midnight.
    pub minute_of_day: u32,
    /// Caller geolocation. `None` disables the distance filter — a
    /// progressive enhancement, not an error.
    pub location: Option<Coordinates>,
    /// Closing hour (24h) at or after which a store counts as open late.
    pub late_hour: u32,
}

impl FilterContext {
    /// Context for the current local moment.
    #[must_use]
    pub fn now(location: Option<Coordinates>, late_hour: u32) -> Self {
        let now = chrono::Local::now();
        Self {
            weekday: chrono::Datelike::weekday(&now),
            minute_of_day: now.hour() * 60 + now.minute(),
            location,
            late_hour,
        }
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::now(None, DEFAULT_LATE_HOUR)
    }
}

/// Search then filter in one call: empty query keeps original order, and
/// the result is narrowed by every active filter.
#[must_use]
pub fn search_stores<'a>(
    records: &'a [ProcessedBookstore],
    query: &str,
    filters: &StoreFilters,
    ctx: &FilterContext,
) -> Vec<&'a ProcessedBookstore> {
    let index = SearchIndex::build(records);
    let matched = index.search(records, query);
    apply_filters(matched, filters, ctx)
}

/// Narrow a record list by every active filter (logical AND).
#[must_use]
pub fn apply_filters<'a>(
    records: Vec<&'a ProcessedBookstore>,
    filters: &StoreFilters,
    ctx: &FilterContext,
) -> Vec<&'a ProcessedBookstore> {
    let distance_filter = match (filters.max_distance_km, ctx.location) {
        (Some(max), Some(origin)) => Some((max, origin)),
        (Some(_), None) => {
            // Geolocation unavailable: skip the filter entirely rather than
            // excluding everything.
            tracing::debug!("caller location unavailable; skipping distance filter");
            None
        }
        (None, _) => None,
    };

    records
        .into_iter()
        .filter(|store| {
            if filters.open_now && !is_open_at(&store.hours, ctx.weekday, ctx.minute_of_day) {
                return false;
            }
            if filters.has_website && store.website.as_deref().is_none_or(str::is_empty) {
                return false;
            }
            if let Some(min) = filters.min_rating {
                // Missing or unparseable rating excludes the store while
                // this filter is active.
                match &store.rating_info {
                    Some(info) if info.rating >= min => {}
                    _ => return false,
                }
            }
            if let Some(province) = &filters.province {
                if normalize_province(&store.province) != normalize_province(province) {
                    return false;
                }
            }
            if let Some(price_level) = &filters.price_level {
                if store.price_level.as_deref() != Some(price_level.as_str()) {
                    return false;
                }
            }
            if let Some((max_km, origin)) = distance_filter {
                // A store without parsed coordinates cannot prove it is in
                // range, so it is excluded while this filter is active.
                match store.coordinates {
                    Some(coords) if haversine_km(origin, coords) <= max_km => {}
                    _ => return false,
                }
            }
            if filters.open_late && !is_open_late(&store.hours, ctx.late_hour) {
                return false;
            }
            if filters.open_weekends && !is_open_weekends(&store.hours) {
                return false;
            }
            true
        })
        .collect()
}

/// Open/closed state at a given weekday and minute. Missing or malformed
/// hour strings degrade to "not open".
fn is_open_at(hours: &WeekHours, weekday: chrono::Weekday, minute: u32) -> bool {
    hours
        .for_weekday(weekday)
        .and_then(parse_day_schedule)
        .is_some_and(|sched| sched.is_open_at(minute))
}

/// True when any day's latest closing time is at or after `late_hour`.
fn is_open_late(hours: &WeekHours, late_hour: u32) -> bool {
    hours.days().iter().any(|(_, text)| {
        text.and_then(parse_day_schedule)
            .and_then(|sched| sched.latest_close())
            .is_some_and(|close| close >= late_hour * 60)
    })
}

/// True when Saturday or Sunday has a parseable, non-Closed schedule.
/// Malformed weekend text counts as not open, same as everywhere else.
fn is_open_weekends(hours: &WeekHours) -> bool {
    [hours.saturday.as_deref(), hours.sunday.as_deref()]
        .into_iter()
        .flatten()
        .filter_map(parse_day_schedule)
        .any(|sched| !matches!(sched, DaySchedule::Closed))
}
