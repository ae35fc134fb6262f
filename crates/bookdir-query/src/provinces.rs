//! Province normalization through a fixed alias table.
//!
//! The source export spells provinces inconsistently ("ON", "Ontario",
//! "ontario", "PEI"). Grouping must treat those as one province, so every
//! lookup funnels through [`normalize_province`] before comparing.
//! Unrecognized inputs pass through verbatim as their own group.

/// (two-letter code, canonical full name) for each Canadian province and
/// territory.
const PROVINCES: [(&str, &str); 13] = [
    ("AB", "Alberta"),
    ("BC", "British Columbia"),
    ("MB", "Manitoba"),
    ("NB", "New Brunswick"),
    ("NL", "Newfoundland and Labrador"),
    ("NS", "Nova Scotia"),
    ("NT", "Northwest Territories"),
    ("NU", "Nunavut"),
    ("ON", "Ontario"),
    ("PE", "Prince Edward Island"),
    ("QC", "Quebec"),
    ("SK", "Saskatchewan"),
    ("YT", "Yukon"),
];

/// Spellings seen in the wild beyond the code/full-name pairs.
const EXTRA_ALIASES: [(&str, &str); 4] = [
    ("PEI", "Prince Edward Island"),
    ("Québec", "Quebec"),
    ("Yukon Territory", "Yukon"),
    ("Newfoundland", "Newfoundland and Labrador"),
];

/// Collapse a province string to its canonical full name.
///
/// Matching is trimmed and case-insensitive against codes, full names, and
/// known aliases. Anything unrecognized is returned trimmed but otherwise
/// verbatim, so unknown provinces still group deterministically.
#[must_use]
pub fn normalize_province(input: &str) -> String {
    let trimmed = input.trim();
    for (code, name) in PROVINCES {
        if trimmed.eq_ignore_ascii_case(code) || trimmed.eq_ignore_ascii_case(name) {
            return name.to_string();
        }
    }
    for (alias, name) in EXTRA_ALIASES {
        if trimmed.eq_ignore_ascii_case(alias) {
            return name.to_string();
        }
    }
    trimmed.to_string()
}

/// Two-letter code for a canonical province name; `None` for pass-through
/// provinces the table does not know.
#[must_use]
pub fn province_code(canonical_name: &str) -> Option<&'static str> {
    PROVINCES
        .iter()
        .find(|(_, name)| canonical_name.eq_ignore_ascii_case(name))
        .map(|&(code, _)| code)
}
