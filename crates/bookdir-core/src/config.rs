use crate::app_config::{
    AppConfig, DEFAULT_FUZZY_THRESHOLD, DEFAULT_LATE_HOUR, DEFAULT_PLACEHOLDER_PHOTO_URL,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Core parsing/validation logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let csv_path = PathBuf::from(or_default("BOOKDIR_CSV_PATH", "./data/bookstores.csv"));
    let log_level = or_default("BOOKDIR_LOG_LEVEL", "info");
    let placeholder_photo_url = or_default(
        "BOOKDIR_PLACEHOLDER_PHOTO_URL",
        DEFAULT_PLACEHOLDER_PHOTO_URL,
    );

    let fuzzy_threshold = parse_f64("BOOKDIR_FUZZY_THRESHOLD", DEFAULT_FUZZY_THRESHOLD)?;
    if !(0.0..=1.0).contains(&fuzzy_threshold) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BOOKDIR_FUZZY_THRESHOLD".to_string(),
            reason: format!("must be between 0 and 1, got {fuzzy_threshold}"),
        });
    }

    let late_hour = parse_u32("BOOKDIR_LATE_HOUR", DEFAULT_LATE_HOUR)?;
    if late_hour > 23 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BOOKDIR_LATE_HOUR".to_string(),
            reason: format!("must be an hour 0-23, got {late_hour}"),
        });
    }

    Ok(AppConfig {
        csv_path,
        log_level,
        placeholder_photo_url,
        fuzzy_threshold,
        late_hour,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_all_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.csv_path.to_str(), Some("./data/bookstores.csv"));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.placeholder_photo_url, DEFAULT_PLACEHOLDER_PHOTO_URL);
        assert!((cfg.fuzzy_threshold - DEFAULT_FUZZY_THRESHOLD).abs() < f64::EPSILON);
        assert_eq!(cfg.late_hour, DEFAULT_LATE_HOUR);
    }

    #[test]
    fn build_app_config_csv_path_override() {
        let mut map = HashMap::new();
        map.insert("BOOKDIR_CSV_PATH", "/srv/export/stores.csv");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.csv_path.to_str(), Some("/srv/export/stores.csv"));
    }

    #[test]
    fn build_app_config_fuzzy_threshold_override() {
        let mut map = HashMap::new();
        map.insert("BOOKDIR_FUZZY_THRESHOLD", "0.9");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.fuzzy_threshold - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn build_app_config_fuzzy_threshold_invalid() {
        let mut map = HashMap::new();
        map.insert("BOOKDIR_FUZZY_THRESHOLD", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKDIR_FUZZY_THRESHOLD"),
            "expected InvalidEnvVar(BOOKDIR_FUZZY_THRESHOLD), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fuzzy_threshold_out_of_range() {
        let mut map = HashMap::new();
        map.insert("BOOKDIR_FUZZY_THRESHOLD", "1.5");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKDIR_FUZZY_THRESHOLD"),
            "expected InvalidEnvVar(BOOKDIR_FUZZY_THRESHOLD), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_late_hour_override() {
        let mut map = HashMap::new();
        map.insert("BOOKDIR_LATE_HOUR", "21");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.late_hour, 21);
    }

    #[test]
    fn build_app_config_late_hour_out_of_range() {
        let mut map = HashMap::new();
        map.insert("BOOKDIR_LATE_HOUR", "25");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKDIR_LATE_HOUR"),
            "expected InvalidEnvVar(BOOKDIR_LATE_HOUR), got: {result:?}"
        );
    }
}
