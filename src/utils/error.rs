use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiversionError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Unknown aircraft type: {aircraft_type}")]
    UnknownAircraftError { aircraft_type: String },

    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No alternates available for selection")]
    NoAlternatesAvailable,

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Worker task failed: {message}")]
    TaskError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Selection,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiversionError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        DiversionError::InvalidInputError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DiversionError::ConfigurationError { .. }
            | DiversionError::UnknownAircraftError { .. }
            | DiversionError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DiversionError::InvalidInputError { .. } => ErrorCategory::Input,
            DiversionError::NoAlternatesAvailable => ErrorCategory::Selection,
            DiversionError::IoError(_)
            | DiversionError::SerializationError(_)
            | DiversionError::CsvError(_)
            | DiversionError::TaskError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 未知機型會自動改用預設性能資料
            DiversionError::UnknownAircraftError { .. } => ErrorSeverity::Low,
            DiversionError::SerializationError(_) | DiversionError::CsvError(_) => {
                ErrorSeverity::Medium
            }
            DiversionError::ConfigurationError { .. }
            | DiversionError::ConfigValidationError { .. }
            | DiversionError::InvalidInputError { .. }
            | DiversionError::NoAlternatesAvailable => ErrorSeverity::High,
            DiversionError::IoError(_) | DiversionError::TaskError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DiversionError::ConfigurationError { .. } => {
                "Check the scenario file and command-line flags".to_string()
            }
            DiversionError::UnknownAircraftError { aircraft_type } => format!(
                "Add a profile for '{}' under [[aircraft_profiles]] or use a known ICAO type",
                aircraft_type
            ),
            DiversionError::InvalidInputError { field, .. } => format!(
                "Correct '{}': latitudes must be within [-90, 90], longitudes within [-180, 180], fuel values non-negative",
                field
            ),
            DiversionError::NoAlternatesAvailable => {
                "Supply at least one alternate or pick a route region".to_string()
            }
            DiversionError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' entry in the scenario file", field)
            }
            DiversionError::IoError(_) => "Verify the file path and permissions".to_string(),
            DiversionError::SerializationError(_) | DiversionError::CsvError(_) => {
                "Retry with a different output format".to_string()
            }
            DiversionError::TaskError { .. } => {
                "Lower concurrent_flights and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DiversionError::InvalidInputError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            DiversionError::NoAlternatesAvailable => {
                "No candidate alternates were given, nothing to evaluate".to_string()
            }
            DiversionError::UnknownAircraftError { aircraft_type } => {
                format!("Aircraft type '{}' is not in the performance table", aircraft_type)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_high_severity() {
        let err = DiversionError::invalid_input("latitude_deg", f64::NAN, "must be finite");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("latitude_deg"));
        assert!(err.user_friendly_message().contains("must be finite"));
    }

    #[test]
    fn test_unknown_aircraft_is_recoverable() {
        let err = DiversionError::UnknownAircraftError {
            aircraft_type: "ZZZZ".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.recovery_suggestion().contains("ZZZZ"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert!(ErrorSeverity::High > ErrorSeverity::Medium);
        assert!(ErrorSeverity::Medium > ErrorSeverity::Low);
    }
}
