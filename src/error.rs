//! Error types for u-timetable.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Which reference map a lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Course,
    Teacher,
    Group,
    Room,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReferenceKind::Course => "course",
            ReferenceKind::Teacher => "teacher",
            ReferenceKind::Group => "group",
            ReferenceKind::Room => "room",
        };
        f.write_str(s)
    }
}

/// Main error type for timetable building.
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input failed integrity checks.
    #[error("Invalid input: {} problem(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// A lesson references an entity with no resource index. The input
    /// was not resolved against the index map it is built with.
    #[error("Lesson '{lesson}' references unknown {kind} '{reference}'")]
    UnknownReference {
        lesson: String,
        kind: ReferenceKind,
        reference: String,
    },
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

/// Result alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
