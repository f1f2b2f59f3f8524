//! Error types for the cleaning engine and its CSV collaborators.
//!
//! Errors serialize as `{ code, message }` so an orchestrator can relay
//! them without matching on Rust types.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for cleaning operations.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// A critical column named in the configuration is absent from the table.
    #[error("Critical column '{column}' not found in dataset")]
    Configuration { column: String },

    /// A fill was required but the column holds no non-missing value.
    #[error("Cannot impute column '{column}': it has no non-missing values")]
    EmptyColumn { column: String },

    /// Configuration values out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A table operation failed inside polars.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A config file or report could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any of the above, prefixed with what was being attempted.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Wrap `self` with a description of the failed step.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for callers that relay failures to users.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::EmptyColumn { .. } => "EMPTY_COLUMN",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the caller can fix this by adjusting the configuration.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration { .. } | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_configuration(),
            _ => false,
        }
    }
}

impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = CleaningError::Configuration {
            column: "id".to_string(),
        };
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        let err = CleaningError::EmptyColumn {
            column: "age".to_string(),
        };
        assert_eq!(err.error_code(), "EMPTY_COLUMN");
    }

    #[test]
    fn test_is_configuration() {
        assert!(
            CleaningError::Configuration {
                column: "id".to_string()
            }
            .is_configuration()
        );
        assert!(CleaningError::InvalidConfig("bad".to_string()).is_configuration());
        assert!(
            !CleaningError::EmptyColumn {
                column: "age".to_string()
            }
            .is_configuration()
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::Configuration {
            column: "customer_id".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("CONFIGURATION_ERROR"));
        assert!(json.contains("customer_id"));
    }

    #[test]
    fn test_with_context() {
        let error = CleaningError::EmptyColumn {
            column: "age".to_string(),
        }
        .with_context("While handling missing values");
        assert!(error.to_string().contains("While handling missing values"));
        assert_eq!(error.error_code(), "EMPTY_COLUMN");
    }
}
