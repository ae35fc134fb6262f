use std::path::PathBuf;

/// Fallback photo URL used when a record has no usable `photos_url`.
pub const DEFAULT_PLACEHOLDER_PHOTO_URL: &str = "/images/placeholder-bookstore.jpg";

/// Default Jaro-Winkler score a fuzzy match must reach.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Default hour (24h clock) at or after which a closing time counts as
/// "open late".
pub const DEFAULT_LATE_HOUR: u32 = 20;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the bookstore CSV export.
    pub csv_path: PathBuf,
    pub log_level: String,
    /// Substituted for records with no usable photo URL.
    pub placeholder_photo_url: String,
    /// Minimum Jaro-Winkler score for a fuzzy search match.
    pub fuzzy_threshold: f64,
    /// Closing hour (24h) at or after which a store counts as open late.
    pub late_hour: u32,
}
