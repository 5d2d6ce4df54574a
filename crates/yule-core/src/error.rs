//! Error types for Yule

use thiserror::Error;

/// The main error type for Yule operations
#[derive(Debug, Error)]
pub enum YuleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl YuleError {
    /// Check that `value` lies in `[min, max]`, naming the offending field otherwise.
    pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
        if value.is_nan() || value < min || value > max {
            return Err(YuleError::ValueOutOfRange {
                field: field.to_string(),
                min,
                max,
                value,
            });
        }
        Ok(())
    }

    /// Check that `value` is strictly positive and finite.
    pub fn check_positive(field: &str, value: f64) -> Result<()> {
        if !(value.is_finite() && value > 0.0) {
            return Err(YuleError::InvalidConfig(format!(
                "{field} must be positive, got {value}"
            )));
        }
        Ok(())
    }
}

/// Result type alias for Yule operations
pub type Result<T> = std::result::Result<T, YuleError>;

impl From<toml::de::Error> for YuleError {
    fn from(err: toml::de::Error) -> Self {
        YuleError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_names_field() {
        let err = YuleError::check_range("drag", 1.5, 0.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("drag"));
        assert!(YuleError::check_range("drag", 0.98, 0.0, 1.0).is_ok());
    }

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert!(YuleError::check_positive("duration", 0.0).is_err());
        assert!(YuleError::check_positive("duration", f64::NAN).is_err());
        assert!(YuleError::check_positive("duration", 2.0).is_ok());
    }
}
