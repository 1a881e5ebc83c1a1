use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// Letter grades accepted on a course row, best to worst.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 10] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// Grade point on the 4.00 scale. Total over the enumeration.
    pub const fn point(self) -> f64 {
        match self {
            LetterGrade::APlus => 4.00,
            LetterGrade::A => 3.75,
            LetterGrade::AMinus => 3.50,
            LetterGrade::BPlus => 3.25,
            LetterGrade::B => 3.00,
            LetterGrade::BMinus => 2.75,
            LetterGrade::CPlus => 2.50,
            LetterGrade::C => 2.25,
            LetterGrade::D => 2.00,
            LetterGrade::F => 0.00,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// Option label, e.g. `A- (3.50)`.
    pub fn label(self) -> String {
        format!("{} ({:.2})", self.as_str(), self.point())
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        LetterGrade::ALL
            .into_iter()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| GradeError::UnknownGrade(s.to_string()))
    }
}
