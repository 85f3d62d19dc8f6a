use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    /// A caller-supplied value is outside of its domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// The reference tables failed validation when loaded.
    #[error("invalid reference tables: {0}")]
    InvalidTables(String),
}

pub type Result<T, E = CalculationError> = std::result::Result<T, E>;

/// Require a finite, strictly positive value.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalculationError::InvalidParameter { name, value, reason: "must be positive" })
    }
}

/// Require a finite, non-negative value.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalculationError::InvalidParameter { name, value, reason: "must not be negative" })
    }
}

/// Require at least one year of service life.
pub fn ensure_years(name: &'static str, years: u32) -> Result<u32> {
    if years >= 1 {
        Ok(years)
    } else {
        Err(CalculationError::InvalidParameter {
            name,
            value: f64::from(years),
            reason: "must be at least one year",
        })
    }
}

/// Require a finite fraction within `[0, 1]`.
pub fn ensure_fraction(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CalculationError::InvalidParameter { name, value, reason: "must be within [0, 1]" })
    }
}
