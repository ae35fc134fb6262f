//! Row validation against the bookstore schema.
//!
//! The validator's only job is presence: required fields must be non-empty
//! strings after column mapping. Numeric-looking fields (rating,
//! coordinates, review counts) stay strings at this layer; parsing them is
//! the record processor's concern.

use crate::error::SchemaError;
use crate::record::{BookstoreRecord, RawRow, ReviewSlot, WeekHours};

/// Fields that must be present and non-empty for a row to validate.
const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "address",
    "city",
    "province",
    "postal_code",
    "latitude",
    "longitude",
    "place_id",
];

/// Validate a mapped row into a [`BookstoreRecord`].
///
/// Pure check: no side effects, no numeric parsing. Optional fields with
/// empty-string values become `None` so empty cells never leak past this
/// layer.
///
/// # Errors
///
/// Returns [`SchemaError::MissingFields`] listing *every* required field
/// that is absent or blank.
pub fn validate_row(row: &RawRow) -> Result<BookstoreRecord, SchemaError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|&&field| row.get(field).is_none_or(|v| v.trim().is_empty()))
        .map(|&field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(SchemaError::MissingFields { fields: missing });
    }

    let required = |field: &str| -> String {
        // Presence checked above.
        row.get(field).map(|v| v.trim().to_string()).unwrap_or_default()
    };
    let optional = |field: &str| -> Option<String> {
        row.get(field)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let hours = WeekHours {
        sunday: optional("sun_hours"),
        monday: optional("mon_hours"),
        tuesday: optional("tue_hours"),
        wednesday: optional("wed_hours"),
        thursday: optional("thu_hours"),
        friday: optional("fri_hours"),
        saturday: optional("sat_hours"),
    };

    let reviews = std::array::from_fn(|i| {
        let slot = i + 1;
        ReviewSlot {
            author: optional(&format!("review{slot}_author")),
            rating: optional(&format!("review{slot}_rating")),
            time: optional(&format!("review{slot}_time")),
            text: optional(&format!("review{slot}_text")),
        }
    });

    Ok(BookstoreRecord {
        place_id: required("place_id"),
        name: required("name"),
        address: required("address"),
        city: required("city"),
        province: required("province"),
        postal_code: required("postal_code"),
        latitude: required("latitude"),
        longitude: required("longitude"),
        phone: optional("phone"),
        website: optional("website"),
        email: optional("email"),
        rating: optional("rating"),
        review_count: optional("review_count"),
        price_level: optional("price_level"),
        photos_url: optional("photos_url"),
        status: optional("status"),
        hours,
        reviews,
    })
}
