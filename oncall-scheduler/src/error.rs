use thiserror::Error;

/// All failure modes `generate_roster` can surface. Variants mirror the error kinds a caller needs to branch
/// on; `Display` produces the human-readable message a front end can show verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("{field} must be in range [{min}, {max}], got {actual}")]
    InvalidRange { field: String, min: i64, max: i64, actual: i64 },

    #[error("At least 2 staff members are required, got {0}")]
    InsufficientStaff(usize),

    #[error("A Junior is present without any Senior on the team")]
    MissingSenior,

    #[error("Schedule generation error: {0}")]
    NoSolution(String),

    #[error("Schedule generation error: expected {expected} days, got {actual}")]
    DecodeInvariant { expected: usize, actual: usize },

    #[error("Internal error")]
    InternalError,
}
