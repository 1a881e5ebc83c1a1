//! The shared attempted/valid reduction behind both calculators.
//!
//! A row list is folded into a [`Tally`]; the tally then decides between a
//! rounded number and a [`Guidance`] message. The course and term pipelines
//! differ only in how a single row classifies itself, which is what
//! [`RowEntry`] captures.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::config::CalcOptions;
use crate::domain::{CourseEntry, TermEntry};
use crate::error::{GradeError, Result};
use crate::id::RowId;
use crate::outcome::{Guidance, Outcome, Pipeline};

/// Weighted contribution of one usable row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
    pub points: f64,
    pub weight: f64,
}

/// A row kind that can be listed on a sheet and reduced by [`aggregate`].
pub trait RowEntry: Clone + fmt::Debug + fmt::Display {
    /// Editable fields, addressed by name from the presentation layer.
    type Field: Copy + fmt::Debug + FromStr<Err = GradeError>;

    const PIPELINE: Pipeline;

    /// Fresh row with default fields. `ordinal` is the row's 1-based
    /// position once inserted.
    fn blank(id: RowId, ordinal: usize) -> Self;

    fn id(&self) -> &RowId;

    fn set_field(&mut self, field: Self::Field, value: &str) -> Result<()>;

    /// Any field carries input.
    fn is_attempted(&self) -> bool;

    /// `Some` when the row is usable for the calculation.
    fn contribution(&self, options: &CalcOptions) -> Option<Contribution>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tally {
    pub attempted: usize,
    pub valid: usize,
    pub points: f64,
    pub weight: f64,
}

impl Tally {
    pub fn of<E: RowEntry>(rows: &[E], options: &CalcOptions) -> Self {
        let mut t = Tally::default();
        for row in rows {
            if !row.is_attempted() {
                trace!(id = %row.id(), "blank row skipped");
                continue;
            }
            t.attempted += 1;
            match row.contribution(options) {
                Some(c) => {
                    t.valid += 1;
                    t.points += c.points;
                    t.weight += c.weight;
                }
                None => trace!(id = %row.id(), "attempted row not usable"),
            }
        }
        t
    }

    pub fn decide(&self, pipeline: Pipeline) -> Outcome {
        if self.valid > 0 && self.valid == self.attempted && self.weight > 0.0 {
            return Outcome::Value {
                pipeline,
                value: round2(self.points / self.weight),
            };
        }
        let guidance = if self.attempted == 0 {
            Guidance::NothingEntered
        } else if self.valid < self.attempted {
            Guidance::IncompleteRows
        } else {
            Guidance::Unavailable
        };
        Outcome::Guidance { pipeline, guidance }
    }
}

const TIE_EPSILON: f64 = 1e-9;

/// Round half-up to two decimals. Decimal ties stored a hair below `.5`
/// in binary (e.g. 3.675) still round up.
pub fn round2(x: f64) -> f64 {
    (x * 100.0 + 0.5 + TIE_EPSILON).floor() / 100.0
}

/// Reduce a row list to its outcome. Pure: same rows, same outcome.
pub fn aggregate<E: RowEntry>(rows: &[E], options: &CalcOptions) -> Outcome {
    let tally = Tally::of(rows, options);
    let outcome = tally.decide(E::PIPELINE);
    debug!(
        pipeline = %E::PIPELINE,
        rows = rows.len(),
        attempted = tally.attempted,
        valid = tally.valid,
        value = ?outcome.value(),
        "calculated"
    );
    outcome
}

/// Semester GPA over fixed-credit courses.
pub fn gpa(courses: &[CourseEntry], options: &CalcOptions) -> Outcome {
    aggregate(courses, options)
}

/// Cumulative GPA as the plain mean of term GPAs.
pub fn cgpa(terms: &[TermEntry]) -> Outcome {
    aggregate(terms, &CalcOptions::default())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::grade::LetterGrade;
    use proptest::prelude::*;

    fn graded(grades: &[usize]) -> Vec<CourseEntry> {
        grades
            .iter()
            .enumerate()
            .map(|(i, g)| CourseEntry {
                id: RowId::new(format!("c{i}")),
                name: format!("Subject {}", i + 1),
                grade: Some(LetterGrade::ALL[*g]),
            })
            .collect()
    }

    fn blank(n: usize) -> CourseEntry {
        CourseEntry {
            id: RowId::new(format!("blank{n}")),
            name: String::new(),
            grade: None,
        }
    }

    proptest! {
        #[test]
        fn fully_graded_gpa_is_mean_of_points(grades in prop::collection::vec(0usize..10, 1..12)) {
            let rows = graded(&grades);
            let mean = grades.iter().map(|g| LetterGrade::ALL[*g].point()).sum::<f64>()
                / grades.len() as f64;
            let out = gpa(&rows, &CalcOptions::default());
            prop_assert_eq!(out.value(), Some(round2(mean)));
        }

        #[test]
        fn gpa_stays_on_scale(grades in prop::collection::vec(0usize..10, 1..12)) {
            let v = gpa(&graded(&grades), &CalcOptions::default()).value().unwrap();
            prop_assert!((0.0..=4.0).contains(&v));
        }

        #[test]
        fn any_ungraded_attempt_blocks(grades in prop::collection::vec(0usize..10, 0..8), at in 0usize..8) {
            let mut rows = graded(&grades);
            let at = at.min(rows.len());
            rows.insert(at, CourseEntry {
                id: RowId::new("missing"),
                name: "Ungraded".into(),
                grade: None,
            });
            let out = gpa(&rows, &CalcOptions::default());
            prop_assert_eq!(out.guidance(), Some(Guidance::IncompleteRows));
        }

        #[test]
        fn blank_rows_never_change_the_result(
            grades in prop::collection::vec(0usize..10, 0..8),
            ungraded in any::<bool>(),
            blanks in prop::collection::vec(0usize..10, 0..6),
        ) {
            let mut rows = graded(&grades);
            if ungraded {
                rows.push(CourseEntry { id: RowId::new("u"), name: "U".into(), grade: None });
            }
            let before = gpa(&rows, &CalcOptions::default());
            for (n, at) in blanks.into_iter().enumerate() {
                let at = at.min(rows.len());
                rows.insert(at, blank(n));
            }
            prop_assert_eq!(gpa(&rows, &CalcOptions::default()), before);
        }

        #[test]
        fn calculation_is_idempotent(grades in prop::collection::vec(0usize..10, 0..8)) {
            let rows = graded(&grades);
            prop_assert_eq!(
                gpa(&rows, &CalcOptions::default()),
                gpa(&rows, &CalcOptions::default())
            );
        }
    }
}
