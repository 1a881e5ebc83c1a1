use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GradeError;

/// Which of the two calculators produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    Gpa,
    Cgpa,
}

impl Pipeline {
    pub const fn as_str(self) -> &'static str {
        match self {
            Pipeline::Gpa => "gpa",
            Pipeline::Cgpa => "cgpa",
        }
    }

    pub const fn heading(self) -> &'static str {
        match self {
            Pipeline::Gpa => "Your Semester GPA is",
            Pipeline::Cgpa => "Your CGPA is",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pipeline {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpa" => Ok(Pipeline::Gpa),
            "cgpa" => Ok(Pipeline::Cgpa),
            other => Err(GradeError::Input(format!("unknown calculator {other:?}"))),
        }
    }
}

/// Why no number could be reported, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guidance {
    /// No row carries any input.
    NothingEntered,
    /// Some attempted row is missing a usable grade or GPA.
    IncompleteRows,
    /// Every attempted row is usable but the weights summed to zero.
    Unavailable,
}

impl Guidance {
    pub const fn message(self, pipeline: Pipeline) -> &'static str {
        match (pipeline, self) {
            (Pipeline::Gpa, Guidance::NothingEntered) => {
                "Please add courses and select their grades to calculate GPA."
            }
            (Pipeline::Gpa, Guidance::IncompleteRows) => {
                "Please ensure all entered courses have a selected grade."
            }
            (Pipeline::Gpa, Guidance::Unavailable) => "Unable to calculate GPA. Check your inputs.",
            (Pipeline::Cgpa, Guidance::NothingEntered) => {
                "Please add year/term entries and their GPAs to calculate CGPA."
            }
            (Pipeline::Cgpa, Guidance::IncompleteRows) => {
                "Please ensure all entered year/terms have a valid Year/Term name and GPA (0-4)."
            }
            (Pipeline::Cgpa, Guidance::Unavailable) => {
                "Unable to calculate CGPA. Check your inputs."
            }
        }
    }
}

/// Result of one calculation: a rounded number or a guidance message.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Value { pipeline: Pipeline, value: f64 },
    Guidance { pipeline: Pipeline, guidance: Guidance },
}

/// Serializable view of an [`Outcome`]; exactly one of `value` / `message`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutcomeReport {
    pub kind: Pipeline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl Outcome {
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Outcome::Value { pipeline, .. } | Outcome::Guidance { pipeline, .. } => *pipeline,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value { value, .. } => Some(*value),
            Outcome::Guidance { .. } => None,
        }
    }

    pub fn guidance(&self) -> Option<Guidance> {
        match self {
            Outcome::Guidance { guidance, .. } => Some(*guidance),
            Outcome::Value { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::Guidance { pipeline, guidance } => Some(guidance.message(*pipeline)),
            Outcome::Value { .. } => None,
        }
    }

    pub fn report(&self) -> OutcomeReport {
        OutcomeReport {
            kind: self.pipeline(),
            value: self.value(),
            message: self.message(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value { pipeline, value } => write!(f, "{}: {value:.2}", pipeline.heading()),
            Outcome::Guidance { pipeline, guidance } => f.write_str(guidance.message(*pipeline)),
        }
    }
}
