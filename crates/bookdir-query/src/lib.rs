pub mod geo;
pub mod provinces;
pub mod search;

pub use geo::{
    extract_cities, extract_provinces, haversine_km, stores_by_city, stores_by_province, CityInfo,
    ProvinceInfo,
};
pub use provinces::{normalize_province, province_code};
pub use search::{apply_filters, search_stores, FilterContext, SearchIndex, StoreFilters};
