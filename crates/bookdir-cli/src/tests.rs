//! End-to-end pipeline tests: inline CSV → ingest → process → index/search.

use bookdir_core::app_config::{DEFAULT_LATE_HOUR, DEFAULT_PLACEHOLDER_PHOTO_URL};
use bookdir_core::ProcessedBookstore;
use bookdir_ingest::{ingest_reader, process_record};
use bookdir_query::{extract_provinces, search_stores, FilterContext, StoreFilters};

const CSV: &str = "\
name,full_address,city,state,postal_code,latitude,longitude,place_id,site,rating,reviews,price_level,working_hours,review2_author,review2_rating,review2_time,review2_text,review3_text
Bellwoods Books,123 Queen St W,Toronto,ON,M6J 1G1,43.6465,-79.4198,ChIJ001,https://bellwoods.ca,4.5,120,$$,Monday: 9AM-6PM | Friday: 9AM-10PM | Saturday: 10:00-17:00 | Sunday: Closed,,,,,Great shop
Type Books,883 Queen St W,Toronto,Ontario,M6J 1G3,43.6441,-79.4114,ChIJ002,,4.8,250,$$,Saturday: Closed | Sunday: Closed,,,,,
Munro's Books,1108 Government St,Victoria,BC,V8W 1Y2,48.4244,-123.3683,ChIJ003,https://munrobooks.com,4.9,2100,$$,Monday: 9AM-9PM,,,,,
Broken Row,,Hamilton,ON,L8N 1A1,,,ChIJ004,,,,,,,,,,
";

fn pipeline() -> (Vec<ProcessedBookstore>, usize) {
    let report = ingest_reader(CSV.as_bytes()).expect("inline CSV must parse");
    let records = report
        .records
        .iter()
        .map(|r| process_record(r, DEFAULT_PLACEHOLDER_PHOTO_URL))
        .collect();
    (records, report.errors.len())
}

fn ctx() -> FilterContext {
    FilterContext {
        weekday: chrono::Weekday::Mon,
        minute_of_day: 12 * 60,
        location: None,
        late_hour: DEFAULT_LATE_HOUR,
    }
}

#[test]
fn every_row_accounted_for() {
    let (records, errors) = pipeline();
    // 4 data rows: 3 valid, 1 missing address/latitude/longitude.
    assert_eq!(records.len(), 3);
    assert_eq!(errors, 1);
}

#[test]
fn photos_url_is_never_empty() {
    let (records, _) = pipeline();
    assert!(records.iter().all(|r| !r.photos_url.is_empty()));
}

#[test]
fn on_and_ontario_group_together() {
    let (records, _) = pipeline();
    let provinces = extract_provinces(&records);
    let ontario = provinces.iter().find(|p| p.name == "Ontario").unwrap();
    assert_eq!(ontario.total_stores, 2);
    let total: usize = provinces.iter().map(|p| p.total_stores).sum();
    assert_eq!(total, records.len());
}

#[test]
fn review_slots_survive_the_pipeline() {
    let (records, _) = pipeline();
    let bellwoods = records.iter().find(|r| r.name == "Bellwoods Books").unwrap();
    let reviews = &bellwoods.rating_info.as_ref().unwrap().reviews;
    // Slot 2 was entirely empty and must be dropped; slot 3 had only text.
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].author, "");
    assert!((reviews[0].rating - 0.0).abs() < f64::EPSILON);
    assert_eq!(reviews[0].text, "Great shop");
}

#[test]
fn packed_hours_unpack_per_day() {
    let (records, _) = pipeline();
    let bellwoods = records.iter().find(|r| r.name == "Bellwoods Books").unwrap();
    assert_eq!(bellwoods.hours.saturday.as_deref(), Some("10:00-17:00"));
    assert_eq!(bellwoods.hours.sunday.as_deref(), Some("Closed"));
    assert!(bellwoods.hours.tuesday.is_none());
}

#[test]
fn typo_query_finds_store() {
    let (records, _) = pipeline();
    let results = search_stores(&records, "belwood", &StoreFilters::default(), &ctx());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Bellwoods Books");
}

#[test]
fn filter_only_search_keeps_original_order() {
    let (records, _) = pipeline();
    let filters = StoreFilters {
        min_rating: Some(4.6),
        ..StoreFilters::default()
    };
    let results = search_stores(&records, "", &filters, &ctx());
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Type Books", "Munro's Books"]);
}

#[test]
fn open_late_excludes_early_closers() {
    let (records, _) = pipeline();
    let filters = StoreFilters {
        open_late: true,
        ..StoreFilters::default()
    };
    let results = search_stores(&records, "", &filters, &ctx());
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    // Bellwoods closes 22:00 Friday, Munro's 21:00 Monday; Type has no
    // late close on record.
    assert_eq!(names, vec!["Bellwoods Books", "Munro's Books"]);
}

#[test]
fn open_weekends_distinguishes_closed_from_missing() {
    let (records, _) = pipeline();
    let filters = StoreFilters {
        open_weekends: true,
        ..StoreFilters::default()
    };
    let results = search_stores(&records, "", &filters, &ctx());
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    // Type is explicitly closed both days; Munro's has no weekend data at
    // all — neither passes.
    assert_eq!(names, vec!["Bellwoods Books"]);
}

#[test]
fn slugs_are_deterministic_and_url_safe() {
    let (first, _) = pipeline();
    let (second, _) = pipeline();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.slug, b.slug);
        assert!(a
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!a.slug.starts_with('-') && !a.slug.ends_with('-'));
    }
}
