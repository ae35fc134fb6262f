//! Derivation of display-ready records from validated rows.
//!
//! [`process_record`] is pure and total: malformed numeric strings degrade
//! to absent fields, never errors. The string-typed [`BookstoreRecord`]
//! stays untouched; everything numeric lives only on the processed view so
//! consumers cannot compare a string rating to a numeric threshold.

use bookdir_core::{
    store_slug, BookstoreRecord, Coordinates, ProcessedBookstore, RatingInfo, Review,
};

/// Statuses passed through from the source; anything else (or nothing)
/// becomes `"OPERATIONAL"`.
const KNOWN_STATUSES: [&str; 3] = ["OPERATIONAL", "CLOSED_TEMPORARILY", "CLOSED_PERMANENTLY"];

/// Derive the display-ready view of one validated record.
#[must_use]
pub fn process_record(record: &BookstoreRecord, placeholder_photo_url: &str) -> ProcessedBookstore {
    let coordinates = parse_coordinates(&record.latitude, &record.longitude);
    let rating_info = build_rating_info(record);
    let formatted_address = format_address(record);

    // Resolution order: trimmed source URL, else the placeholder. The field
    // is never empty.
    let photos_url = record
        .photos_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(placeholder_photo_url)
        .to_string();

    let status = record
        .status
        .as_deref()
        .map(str::to_uppercase)
        .filter(|s| KNOWN_STATUSES.contains(&s.as_str()))
        .unwrap_or_else(|| "OPERATIONAL".to_string());

    ProcessedBookstore {
        place_id: record.place_id.clone(),
        name: record.name.clone(),
        slug: store_slug(&record.name, &record.city, &record.province),
        address: record.address.clone(),
        city: record.city.clone(),
        province: record.province.clone(),
        postal_code: record.postal_code.clone(),
        formatted_address,
        phone: record.phone.clone(),
        website: record.website.clone(),
        email: record.email.clone(),
        price_level: record.price_level.clone(),
        coordinates,
        rating_info,
        hours: record.hours.clone(),
        photos_url,
        status,
    }
}

/// Both components must parse to finite numbers, otherwise no coordinates.
/// A store with garbage coordinates must not silently appear at (0, 0).
fn parse_coordinates(latitude: &str, longitude: &str) -> Option<Coordinates> {
    let lat = parse_finite(latitude)?;
    let lng = parse_finite(longitude)?;
    Some(Coordinates { lat, lng })
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rating info exists only when the rating string parses. The review count
/// defaults to 0, and only review slots with at least one non-empty
/// sub-field become reviews — an all-empty slot is absent data, not a
/// zero-rated review.
fn build_rating_info(record: &BookstoreRecord) -> Option<RatingInfo> {
    let rating = parse_finite(record.rating.as_deref()?)?;

    let num_reviews = record
        .review_count
        .as_deref()
        .map(|s| s.replace(',', ""))
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0);

    let reviews = record
        .reviews
        .iter()
        .filter(|slot| !slot.is_empty())
        .map(|slot| Review {
            author: slot.author.clone().unwrap_or_default(),
            rating: slot
                .rating
                .as_deref()
                .and_then(parse_finite)
                .unwrap_or(0.0),
            time: slot.time.clone().unwrap_or_default(),
            text: slot.text.clone().unwrap_or_default(),
        })
        .collect();

    Some(RatingInfo {
        rating,
        num_reviews,
        reviews,
    })
}

fn format_address(record: &BookstoreRecord) -> String {
    [
        record.address.as_str(),
        record.city.as_str(),
        record.province.as_str(),
        record.postal_code.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}
