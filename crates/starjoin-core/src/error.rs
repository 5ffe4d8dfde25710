//! Error handling for the star-join benchmark
//!
//! The benchmark only recognises two runtime failures, both fatal: running out
//! of memory while materialising data and a surrogate id that is missing from
//! its dimension index. Configuration and emission errors surround them at the
//! edges of the run.

use std::fmt;
use thiserror::Error;

/// Error type for star-join benchmark operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StarJoinError {
    /// Allocation failure while materialising rows, indexes or fact tuples
    #[error("Resource exhaustion: could not reserve {requested} entries for {structure}")]
    ResourceExhaustion { structure: String, requested: usize },

    /// A stored surrogate id is absent from its dimension index
    #[error("Lookup miss: id {id} not found in index of dimension {dimension}")]
    LookupMiss { dimension: usize, id: u64 },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String, setting: Option<String> },

    /// A measurement sink failed to write
    #[error("Emission error: {message}")]
    Emission { message: String },
}

impl StarJoinError {
    /// Get the error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            StarJoinError::ResourceExhaustion { .. } => ErrorCategory::ResourceExhaustion,
            StarJoinError::LookupMiss { .. } => ErrorCategory::LookupMiss,
            StarJoinError::Configuration { .. } => ErrorCategory::Configuration,
            StarJoinError::Emission { .. } => ErrorCategory::Emission,
        }
    }

    /// Whether the error invalidates the measurements of the running experiment.
    ///
    /// Resource exhaustion and lookup misses mean the configured data volume
    /// was not materialised or the enumerator and the store disagree.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StarJoinError::ResourceExhaustion { .. } | StarJoinError::LookupMiss { .. }
        )
    }

    /// Create a resource exhaustion error
    pub fn resource_exhaustion(structure: impl Into<String>, requested: usize) -> Self {
        Self::ResourceExhaustion { structure: structure.into(), requested }
    }

    /// Create a lookup miss error
    pub fn lookup_miss(dimension: usize, id: u64) -> Self {
        Self::LookupMiss { dimension, id }
    }

    /// Create a configuration error without a specific setting
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into(), setting: None }
    }

    /// Create a configuration error for a named setting
    pub fn invalid_setting(setting: &str, message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into(), setting: Some(setting.to_string()) }
    }

    /// Create an emission error
    pub fn emission(message: impl Into<String>) -> Self {
        Self::Emission { message: message.into() }
    }
}

impl From<std::io::Error> for StarJoinError {
    fn from(err: std::io::Error) -> Self {
        Self::emission(err.to_string())
    }
}

/// Error category used as a structured logging field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ResourceExhaustion,
    LookupMiss,
    Configuration,
    Emission,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::ResourceExhaustion => write!(f, "resource_exhaustion"),
            ErrorCategory::LookupMiss => write!(f, "lookup_miss"),
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Emission => write!(f, "emission"),
        }
    }
}

/// Result type alias for benchmark operations
pub type StarJoinResult<T> = Result<T, StarJoinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let miss = StarJoinError::lookup_miss(3, 42);
        assert_eq!(miss.category(), ErrorCategory::LookupMiss);
        assert!(miss.is_fatal());
        assert_eq!(miss.to_string(), "Lookup miss: id 42 not found in index of dimension 3");

        let oom = StarJoinError::resource_exhaustion("fact table", 1_000);
        assert_eq!(oom.category().to_string(), "resource_exhaustion");
        assert!(oom.is_fatal());

        let config = StarJoinError::invalid_setting("repetitions", "must be at least 1");
        assert!(!config.is_fatal());
        match config {
            StarJoinError::Configuration { setting, .. } => {
                assert_eq!(setting.as_deref(), Some("repetitions"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_io_error_becomes_emission_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: StarJoinError = io.into();
        assert_eq!(err.category(), ErrorCategory::Emission);
        assert!(!err.is_fatal());
    }
}
