//! Geographic grouping of processed records by province and city.
//!
//! Aggregates are recomputed from the record list on every call — the list
//! is a few hundred rows and nothing here is on a hot path, so no caching.

use std::collections::BTreeMap;

use bookdir_core::{slugify, Coordinates, ProcessedBookstore};
use serde::Serialize;

use crate::provinces::{normalize_province, province_code};

/// Mean Earth radius, for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Per-city aggregate within a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityInfo {
    pub name: String,
    /// Canonical full name of the parent province.
    pub province: String,
    pub slug: String,
    pub store_count: usize,
}

/// Per-province aggregate over the processed record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceInfo {
    /// Canonical full name, or the verbatim source string for provinces the
    /// alias table does not know.
    pub name: String,
    /// Two-letter code; `None` for pass-through provinces.
    pub code: Option<String>,
    pub slug: String,
    pub total_stores: usize,
    /// Sorted by store count descending, ties alphabetical.
    pub cities: Vec<CityInfo>,
}

/// Group records into provinces with per-city counts.
///
/// Provinces and their cities are both sorted by store count descending,
/// ties broken alphabetically. Every record lands in exactly one province
/// group, so the `total_stores` sum equals the input length.
#[must_use]
pub fn extract_provinces(records: &[ProcessedBookstore]) -> Vec<ProvinceInfo> {
    // province → city key → (display name, count). BTreeMap keys give the
    // alphabetical tie-break for free after the count sort.
    let mut groups: BTreeMap<String, BTreeMap<String, (String, usize)>> = BTreeMap::new();

    for record in records {
        let province = normalize_province(&record.province);
        let city_display = record.city.trim().to_string();
        let city_key = city_display.to_lowercase();
        let cities = groups.entry(province).or_default();
        let entry = cities.entry(city_key).or_insert((city_display, 0));
        entry.1 += 1;
    }

    let mut provinces: Vec<ProvinceInfo> = groups
        .into_iter()
        .map(|(province, cities)| {
            let mut cities: Vec<CityInfo> = cities
                .into_values()
                .map(|(name, store_count)| CityInfo {
                    slug: slugify(&name),
                    province: province.clone(),
                    name,
                    store_count,
                })
                .collect();
            cities.sort_by(|a, b| b.store_count.cmp(&a.store_count).then(a.name.cmp(&b.name)));

            let total_stores = cities.iter().map(|c| c.store_count).sum();
            ProvinceInfo {
                code: province_code(&province).map(str::to_string),
                slug: slugify(&province),
                name: province,
                total_stores,
                cities,
            }
        })
        .collect();

    provinces.sort_by(|a, b| b.total_stores.cmp(&a.total_stores).then(a.name.cmp(&b.name)));
    provinces
}

/// Flatten the province grouping into one city list annotated with parent
/// province, sorted by store count descending, ties alphabetical.
#[must_use]
pub fn extract_cities(records: &[ProcessedBookstore]) -> Vec<CityInfo> {
    let mut cities: Vec<CityInfo> = extract_provinces(records)
        .into_iter()
        .flat_map(|province| province.cities)
        .collect();
    cities.sort_by(|a, b| b.store_count.cmp(&a.store_count).then(a.name.cmp(&b.name)));
    cities
}

/// Records in the given province. The argument is normalized before
/// comparing, so callers may pass `"ON"` or `"Ontario"` interchangeably.
#[must_use]
pub fn stores_by_province<'a>(
    records: &'a [ProcessedBookstore],
    province: &str,
) -> Vec<&'a ProcessedBookstore> {
    let wanted = normalize_province(province);
    records
        .iter()
        .filter(|r| normalize_province(&r.province) == wanted)
        .collect()
}

/// Records in the given city (trimmed, case-insensitive match).
#[must_use]
pub fn stores_by_city<'a>(
    records: &'a [ProcessedBookstore],
    city: &str,
) -> Vec<&'a ProcessedBookstore> {
    let wanted = city.trim().to_lowercase();
    records
        .iter()
        .filter(|r| r.city.trim().to_lowercase() == wanted)
        .collect()
}

/// Great-circle distance between two points, in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
pub(crate) fn make_store(name: &str, city: &str, province: &str) -> ProcessedBookstore {
    use bookdir_core::{store_slug, WeekHours};
    ProcessedBookstore {
        place_id: format!("place-{}", store_slug(name, city, province)),
        name: name.to_string(),
        slug: store_slug(name, city, province),
        address: "1 Main St".to_string(),
        city: city.to_string(),
        province: province.to_string(),
        postal_code: "A1A 1A1".to_string(),
        formatted_address: format!("1 Main St, {city}, {province}, A1A 1A1"),
        phone: None,
        website: None,
        email: None,
        price_level: None,
        coordinates: None,
        rating_info: None,
        hours: WeekHours::default(),
        photos_url: "/images/placeholder-bookstore.jpg".to_string(),
        status: "OPERATIONAL".to_string(),
    }
}
