//! Source-column mapping from the CSV export to schema field names.
//!
//! The export's headers do not match the schema 1:1 (`site` → `website`,
//! `state` → `province`, ...) and the weekly hours arrive packed into a
//! single `working_hours` cell. All header knowledge lives here; the reader
//! and validator only see schema field names.

use bookdir_core::RawRow;

/// Simple header renames: source column name → schema field name.
/// Comparison is case-insensitive.
const HEADER_MAP: [(&str, &str); 16] = [
    ("name", "name"),
    ("full_address", "address"),
    ("city", "city"),
    ("state", "province"),
    ("postal_code", "postal_code"),
    ("phone", "phone"),
    ("site", "website"),
    ("email_1", "email"),
    ("latitude", "latitude"),
    ("longitude", "longitude"),
    ("rating", "rating"),
    ("reviews", "review_count"),
    ("price_level", "price_level"),
    ("place_id", "place_id"),
    ("photo", "photos_url"),
    ("business_status", "status"),
];

/// Day labels scanned for in the packed `working_hours` cell, paired with
/// the schema hour field each unpacks into. Sunday-first to match
/// [`bookdir_core::WeekHours`].
const DAY_FIELDS: [(&str, &str); 7] = [
    ("sunday", "sun_hours"),
    ("monday", "mon_hours"),
    ("tuesday", "tue_hours"),
    ("wednesday", "wed_hours"),
    ("thursday", "thu_hours"),
    ("friday", "fri_hours"),
    ("saturday", "sat_hours"),
];

/// Map one CSV record into a [`RawRow`] keyed by schema field names.
///
/// Unknown columns are dropped. The packed `working_hours` cell is unpacked
/// into the seven per-day hour fields; missing or unparseable day entries
/// become empty strings, never an error.
#[must_use]
pub fn map_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> RawRow {
    let mut mapped = RawRow::new();
    for (header, value) in headers.iter().zip(row.iter()) {
        let header = header.trim();
        let value = value.trim();

        if header.eq_ignore_ascii_case("working_hours") {
            for (field, hours) in unpack_working_hours(value) {
                mapped.insert(field.to_string(), hours);
            }
            continue;
        }

        if let Some(field) = schema_field(header) {
            mapped.insert(field, value.to_string());
        }
    }
    mapped
}

/// Resolve a source header to its schema field name, if the column is one
/// the schema knows about.
fn schema_field(header: &str) -> Option<String> {
    for (source, field) in HEADER_MAP {
        if header.eq_ignore_ascii_case(source) {
            return Some(field.to_string());
        }
    }
    review_field(header)
}

/// Review columns (`review1_author` .. `review5_text`) pass through under
/// their own (lowercased) names.
fn review_field(header: &str) -> Option<String> {
    let lower = header.to_lowercase();
    let rest = lower.strip_prefix("review")?;
    let (slot, sub) = rest.split_once('_')?;
    if !matches!(slot, "1" | "2" | "3" | "4" | "5") {
        return None;
    }
    if !matches!(sub, "author" | "rating" | "time" | "text") {
        return None;
    }
    Some(lower)
}

/// Unpack a packed weekly-hours cell into the seven per-day hour fields.
///
/// The cell is free text of the form
/// `"Monday: 9AM-6PM | Tuesday: 9AM-6PM | ... | Sunday: Closed"` (some
/// exports wrap the same content in JSON-ish quoting). Strategy: locate
/// each day-name label, take the text between it and the next label, and
/// strip label/quoting punctuation. A day that never appears yields an
/// empty string.
#[must_use]
pub fn unpack_working_hours(packed: &str) -> [(&'static str, String); 7] {
    // ASCII lowering keeps byte offsets valid into `packed`.
    let lower = packed.to_ascii_lowercase();

    // Label positions in text order, so each value ends where the next
    // label begins.
    let mut labels: Vec<(usize, usize, &'static str)> = DAY_FIELDS
        .iter()
        .filter_map(|&(day, field)| lower.find(day).map(|pos| (pos, day.len(), field)))
        .collect();
    labels.sort_unstable_by_key(|&(pos, _, _)| pos);

    let mut out: [(&'static str, String); 7] =
        DAY_FIELDS.map(|(_, field)| (field, String::new()));

    for (i, &(pos, label_len, field)) in labels.iter().enumerate() {
        let value_start = pos + label_len;
        let value_end = labels
            .get(i + 1)
            .map_or(packed.len(), |&(next_pos, _, _)| next_pos);
        let value = packed[value_start..value_end]
            .trim_matches(|c: char| c.is_whitespace() || "\"':|,;{}".contains(c))
            .to_string();
        if let Some(slot) = out.iter_mut().find(|(f, _)| *f == field) {
            slot.1 = value;
        }
    }
    out
}
