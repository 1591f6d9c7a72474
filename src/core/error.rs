use thiserror::Error;

/// Rejected input to one of the projection operations.
///
/// `field` is the camelCase key of the offending parameter, so the message
/// reads the same to library callers and API clients, e.g.
/// `tenureMonths must be > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {constraint}")]
pub struct InvalidParameterError {
    pub field: &'static str,
    pub constraint: String,
}

impl InvalidParameterError {
    pub fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), InvalidParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidParameterError::new(field, "must be finite"))
    }
}

pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), InvalidParameterError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(InvalidParameterError::new(field, "must be >= 0"));
    }
    Ok(())
}

/// Rates below -100% would mean losing more than everything in one period.
pub(crate) fn ensure_rate(field: &'static str, percent: f64) -> Result<(), InvalidParameterError> {
    ensure_finite(field, percent)?;
    if percent < -100.0 {
        return Err(InvalidParameterError::new(field, "must be >= -100"));
    }
    Ok(())
}

pub(crate) fn ensure_inflation(
    field: &'static str,
    percent: f64,
) -> Result<(), InvalidParameterError> {
    ensure_finite(field, percent)?;
    if percent == -100.0 {
        return Err(InvalidParameterError::new(field, "cannot equal -100"));
    }
    if percent < -100.0 {
        return Err(InvalidParameterError::new(field, "must be > -100"));
    }
    Ok(())
}

/// Rejects results that overflowed (or became NaN) for accepted inputs, naming
/// the parameter that drives the growth.
pub(crate) fn ensure_representable(
    field: &'static str,
    value: f64,
) -> Result<(), InvalidParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidParameterError::new(
            field,
            "produces a value too large to represent",
        ))
    }
}
