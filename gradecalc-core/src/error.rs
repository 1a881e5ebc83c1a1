use thiserror::Error;

use crate::id::RowId;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown letter grade: {0:?}")]
    UnknownGrade(String),

    #[error("unknown field: {0:?}")]
    UnknownField(String),

    #[error("no row with id {0}")]
    RowNotFound(RowId),

    #[error("cannot remove the last remaining row")]
    LastRow,

    #[error("input error: {0}")]
    Input(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, GradeError>;
