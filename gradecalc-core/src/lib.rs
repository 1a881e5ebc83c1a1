#![forbid(unsafe_code)]

pub mod error;
pub mod config;

pub mod grade;
pub mod id;
pub mod domain;
pub mod outcome;

pub mod aggregate;
pub mod sheet;
pub mod batch;

// Re-exports: stable API surface
pub use aggregate::{RowEntry, aggregate, cgpa, gpa};
pub use batch::Batch;
pub use config::{CalcOptions, FIXED_CREDIT_VALUE_PER_COURSE};
pub use domain::{CourseEntry, CourseField, GpaInput, TermEntry, TermField};
pub use grade::LetterGrade;
pub use id::{IdSource, RowId, SequentialIds, UuidIds};
pub use outcome::{Guidance, Outcome, Pipeline};
pub use sheet::{CourseSheet, Sheet, TermSheet};
