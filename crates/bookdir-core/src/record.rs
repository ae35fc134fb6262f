//! Record types for the bookstore directory pipeline.
//!
//! ## Observed shape of the source export
//!
//! The upstream CSV is a Google-Maps-style place export. Its quirks drive
//! the modeling here:
//!
//! - Numeric-looking columns (`latitude`, `rating`, `reviews`) arrive as
//!   strings and are occasionally garbage (`"N/A"`, `""`, stray unicode).
//!   [`BookstoreRecord`] keeps them as strings for source fidelity; numeric
//!   parsing is deferred to the record processor, which degrades to absent
//!   values rather than erroring.
//! - Weekday hour cells distinguish *missing data* (empty cell) from an
//!   explicit `"Closed"`. Both states must survive into the processed view,
//!   so [`WeekHours`] holds `Option<String>` per day.
//! - Review columns come in five fixed slots (`review1_author` ..
//!   `review5_text`). A slot with all four sub-fields empty means "no
//!   review", not "a review with rating 0".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One CSV data row after source-column mapping, keyed by schema field name.
///
/// Unvalidated external input; discarded once mapped into a
/// [`BookstoreRecord`] or recorded in the row-error ledger.
pub type RawRow = BTreeMap<String, String>;

/// A schema-validated bookstore row, string-typed to mirror the source.
///
/// Required fields are guaranteed non-empty by [`crate::schema::validate_row`];
/// everything else is `None` when the source cell was empty. Immutable after
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookstoreRecord {
    /// Unique external place identifier from the source export.
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    /// Kept as a string here; parsed (or dropped) by the record processor.
    pub latitude: String,
    /// Kept as a string here; parsed (or dropped) by the record processor.
    pub longitude: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<String>,
    pub price_level: Option<String>,
    pub photos_url: Option<String>,
    pub status: Option<String>,
    pub hours: WeekHours,
    pub reviews: [ReviewSlot; 5],
}

/// Per-weekday opening-hours strings.
///
/// `None` means the source had no data for that day; `Some("Closed")` is an
/// explicit closure. The two are distinct states and page templates render
/// them differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekHours {
    pub sunday: Option<String>,
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
}

impl WeekHours {
    /// The hours string for a calendar weekday, if the source had one.
    #[must_use]
    pub fn for_weekday(&self, day: chrono::Weekday) -> Option<&str> {
        match day {
            chrono::Weekday::Sun => self.sunday.as_deref(),
            chrono::Weekday::Mon => self.monday.as_deref(),
            chrono::Weekday::Tue => self.tuesday.as_deref(),
            chrono::Weekday::Wed => self.wednesday.as_deref(),
            chrono::Weekday::Thu => self.thursday.as_deref(),
            chrono::Weekday::Fri => self.friday.as_deref(),
            chrono::Weekday::Sat => self.saturday.as_deref(),
        }
    }

    /// All seven days in Sunday-first order, paired with their labels.
    #[must_use]
    pub fn days(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("sunday", self.sunday.as_deref()),
            ("monday", self.monday.as_deref()),
            ("tuesday", self.tuesday.as_deref()),
            ("wednesday", self.wednesday.as_deref()),
            ("thursday", self.thursday.as_deref()),
            ("friday", self.friday.as_deref()),
            ("saturday", self.saturday.as_deref()),
        ]
    }
}

/// One of the five fixed review slots on a source row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSlot {
    pub author: Option<String>,
    pub rating: Option<String>,
    pub time: Option<String>,
    pub text: Option<String>,
}

impl ReviewSlot {
    /// True when every sub-field is absent — the slot carries no review.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.rating.is_none() && self.time.is_none() && self.text.is_none()
    }
}

/// Parsed geographic coordinates. Only constructed when both components
/// parse to finite numbers — a store with garbage coordinates must not
/// silently land at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A single customer review on a processed record.
///
/// `author` may be empty and `rating` is 0 when the source value did not
/// parse; a review only exists at all if at least one source sub-field was
/// non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: f64,
    pub time: String,
    pub text: String,
}

/// Rating summary for a processed record. Present only when the source
/// rating string parsed to a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingInfo {
    pub rating: f64,
    /// Defaults to 0 when the source count is missing or unparseable.
    pub num_reviews: u32,
    pub reviews: Vec<Review>,
}

/// Display-ready view of a [`BookstoreRecord`], derived once per record at
/// build time and never mutated.
///
/// Invariant: `photos_url` is always a non-empty string (source URL or the
/// configured placeholder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedBookstore {
    pub place_id: String,
    pub name: String,
    /// Deterministic URL path segment from name + city + province.
    pub slug: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    /// `address, city, province, postal_code` with empty parts dropped.
    pub formatted_address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub price_level: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub rating_info: Option<RatingInfo>,
    pub hours: WeekHours,
    pub photos_url: String,
    /// `"OPERATIONAL"` unless the source carried a recognized other status.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_slot_all_none_is_empty() {
        assert!(ReviewSlot::default().is_empty());
    }

    #[test]
    fn review_slot_single_field_is_not_empty() {
        let slot = ReviewSlot {
            text: Some("Great shop".to_string()),
            ..ReviewSlot::default()
        };
        assert!(!slot.is_empty());
    }

    #[test]
    fn week_hours_for_weekday_maps_days() {
        let hours = WeekHours {
            saturday: Some("10:00-17:00".to_string()),
            ..WeekHours::default()
        };
        assert_eq!(
            hours.for_weekday(chrono::Weekday::Sat),
            Some("10:00-17:00")
        );
        assert_eq!(hours.for_weekday(chrono::Weekday::Mon), None);
    }

    #[test]
    fn week_hours_days_is_sunday_first() {
        let hours = WeekHours::default();
        let days = hours.days();
        assert_eq!(days[0].0, "sunday");
        assert_eq!(days[6].0, "saturday");
    }
}
