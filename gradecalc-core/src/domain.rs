use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::{Contribution, RowEntry};
use crate::config::CalcOptions;
use crate::error::{GradeError, Result};
use crate::grade::LetterGrade;
use crate::id::RowId;
use crate::outcome::Pipeline;

pub const GPA_MIN: f64 = 0.0;
pub const GPA_MAX: f64 = 4.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub id: RowId,
    pub name: String,
    pub grade: Option<LetterGrade>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CourseField {
    Name,
    Grade,
}

impl FromStr for CourseField {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "course" => Ok(CourseField::Name),
            "grade" => Ok(CourseField::Grade),
            _ => Err(GradeError::UnknownField(s.to_string())),
        }
    }
}

impl RowEntry for CourseEntry {
    type Field = CourseField;

    const PIPELINE: Pipeline = Pipeline::Gpa;

    fn blank(id: RowId, ordinal: usize) -> Self {
        Self {
            id,
            name: format!("Subject {ordinal}"),
            grade: None,
        }
    }

    fn id(&self) -> &RowId {
        &self.id
    }

    /// An empty grade value clears the grade.
    fn set_field(&mut self, field: CourseField, value: &str) -> Result<()> {
        match field {
            CourseField::Name => self.name = value.to_string(),
            CourseField::Grade => {
                self.grade = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
        }
        Ok(())
    }

    fn is_attempted(&self) -> bool {
        !self.name.is_empty() || self.grade.is_some()
    }

    fn contribution(&self, options: &CalcOptions) -> Option<Contribution> {
        let grade = self.grade?;
        let weight = options.credit_weight();
        Some(Contribution {
            points: grade.point() * weight,
            weight,
        })
    }
}

impl fmt::Display for CourseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "(blank)" } else { self.name.as_str() };
        match self.grade {
            Some(g) => write!(f, "{name} | {}", g.label()),
            None => write!(f, "{name} | -"),
        }
    }
}

/// What was typed into a term's GPA field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum GpaInput {
    #[default]
    Unset,
    Number(f64),
    Malformed(String),
}

impl GpaInput {
    /// Blank text is `Unset`; anything that is not a finite number is kept
    /// verbatim as `Malformed`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return GpaInput::Unset;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => GpaInput::Number(v),
            _ => GpaInput::Malformed(trimmed.to_string()),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, GpaInput::Unset)
    }

    /// The value when it is a number on the 0.00-4.00 scale.
    pub fn in_range(&self) -> Option<f64> {
        match self {
            GpaInput::Number(v) if (GPA_MIN..=GPA_MAX).contains(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for GpaInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpaInput::Unset => Ok(()),
            GpaInput::Number(v) => write!(f, "{v}"),
            GpaInput::Malformed(raw) => f.write_str(raw),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    pub id: RowId,
    pub label: String,
    pub gpa: GpaInput,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TermField {
    Label,
    Gpa,
}

impl FromStr for TermField {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "label" | "year" | "term" => Ok(TermField::Label),
            "gpa" => Ok(TermField::Gpa),
            _ => Err(GradeError::UnknownField(s.to_string())),
        }
    }
}

impl RowEntry for TermEntry {
    type Field = TermField;

    const PIPELINE: Pipeline = Pipeline::Cgpa;

    fn blank(id: RowId, _ordinal: usize) -> Self {
        Self {
            id,
            label: String::new(),
            gpa: GpaInput::Unset,
        }
    }

    fn id(&self) -> &RowId {
        &self.id
    }

    fn set_field(&mut self, field: TermField, value: &str) -> Result<()> {
        match field {
            TermField::Label => self.label = value.to_string(),
            TermField::Gpa => self.gpa = GpaInput::parse(value),
        }
        Ok(())
    }

    fn is_attempted(&self) -> bool {
        !self.label.is_empty() || self.gpa.is_set()
    }

    fn contribution(&self, _options: &CalcOptions) -> Option<Contribution> {
        self.gpa.in_range().map(|points| Contribution {
            points,
            weight: 1.0,
        })
    }
}

impl fmt::Display for TermEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.label.is_empty() { "(blank)" } else { self.label.as_str() };
        if self.gpa.is_set() {
            write!(f, "{label} | {}", self.gpa)
        } else {
            write!(f, "{label} | -")
        }
    }
}
