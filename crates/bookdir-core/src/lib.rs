pub mod app_config;
pub mod config;
pub mod error;
pub mod record;
pub mod schedule;
pub mod schema;
pub mod slug;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, SchemaError};
pub use record::{
    BookstoreRecord, Coordinates, ProcessedBookstore, RatingInfo, RawRow, Review, ReviewSlot,
    WeekHours,
};
pub use schedule::{parse_day_schedule, DaySchedule, TimeRange};
pub use schema::validate_row;
pub use slug::{slugify, store_slug};
