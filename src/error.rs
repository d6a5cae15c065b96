//! Error types for the city procedural core.
//!
//! Generation never fails because the area is too crowded; that case is a
//! partial result reported through [`crate::generation::GenerationReport`].
//! The only hard failure is a malformed configuration, rejected before any
//! random draw is made.

/// Error raised when generation inputs are malformed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
}

impl GenerationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { field, .. } => field,
        }
    }
}

/// Error raised while loading a config file from disk
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {format}: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    #[error("Unsupported config extension: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Invalid(#[from] GenerationError),
}

/// Reject NaN and infinities for a named input
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<f32, GenerationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GenerationError::invalid(field, format!("must be finite, got {value}")))
    }
}

/// Require a strictly positive, finite value
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<f32, GenerationError> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GenerationError::invalid(field, format!("must be > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_carries_field() {
        let err = GenerationError::invalid("spacing", "must be > 0");
        assert_eq!(err.field(), "spacing");
        assert!(err.to_string().contains("spacing"));
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("w", 2.0), Ok(2.0));
        assert!(ensure_positive("w", 0.0).is_err());
        assert!(ensure_positive("w", -1.0).is_err());
        assert!(ensure_positive("w", f32::NAN).is_err());
        assert!(ensure_positive("w", f32::INFINITY).is_err());
    }

    #[test]
    fn test_config_load_error_wraps_generation_error() {
        let err: ConfigLoadError = GenerationError::invalid("min_gap", "negative").into();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
        assert!(err.to_string().contains("min_gap"));
    }
}
