use std::fmt;

/// Rejected field configuration. Only ever produced while constructing or
/// reconfiguring a field; stepping cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyPopulation,
    NonFinite { field: &'static str, value: f64 },
    NonPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    LengthMismatch { phases: usize, frequencies: usize },
    EpsilonOutsideRadius { epsilon: f64, radius: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPopulation => write!(f, "oscillator count must be at least 1"),
            ConfigError::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be > 0, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must be >= 0, got {value}")
            }
            ConfigError::LengthMismatch {
                phases,
                frequencies,
            } => write!(
                f,
                "got {phases} phases but {frequencies} natural frequencies"
            ),
            ConfigError::EpsilonOutsideRadius { epsilon, radius } => write!(
                f,
                "repulsion epsilon {epsilon} must be below repulsion radius {radius}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
