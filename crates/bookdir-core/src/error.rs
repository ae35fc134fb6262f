use thiserror::Error;

/// Every config key carries a default, so the only failure mode is a value
/// that refuses to parse.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// A single row failed required-field validation.
///
/// Carries every violating field, not just the first, so the row-error
/// ledger reports the full problem in one pass.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required field(s): {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },
}
