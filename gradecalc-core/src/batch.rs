use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CalcOptions;
use crate::domain::{CourseField, TermField};
use crate::error::Result;
use crate::id::IdSource;
use crate::sheet::{CourseSheet, Sheet, TermSheet};

/// Rows for both calculators, read from a JSON document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TermRecord {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub gpa: Option<GpaValue>,
}

/// A term GPA may be written as a JSON number or as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GpaValue {
    Number(f64),
    Text(String),
}

impl GpaValue {
    fn as_input(&self) -> String {
        match self {
            GpaValue::Number(v) => v.to_string(),
            GpaValue::Text(s) => s.clone(),
        }
    }
}

impl Batch {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let f = File::open(path)?;
        Self::from_reader(BufReader::new(f))
    }

    /// Course rows in document order. Fails on an unknown letter grade.
    pub fn course_sheet(&self, options: CalcOptions, ids: Box<dyn IdSource>) -> Result<CourseSheet> {
        let mut sheet = Sheet::empty(options, ids);
        for rec in &self.courses {
            let id = sheet.add_row();
            sheet.update_field(&id, CourseField::Name, &rec.name)?;
            sheet.update_field(&id, CourseField::Grade, rec.grade.as_deref().unwrap_or(""))?;
        }
        Ok(sheet)
    }

    pub fn term_sheet(&self, options: CalcOptions, ids: Box<dyn IdSource>) -> Result<TermSheet> {
        let mut sheet = Sheet::empty(options, ids);
        for rec in &self.terms {
            let id = sheet.add_row();
            sheet.update_field(&id, TermField::Label, &rec.label)?;
            let gpa = rec.gpa.as_ref().map(GpaValue::as_input).unwrap_or_default();
            sheet.update_field(&id, TermField::Gpa, &gpa)?;
        }
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GpaInput;
    use crate::error::GradeError;
    use crate::id::SequentialIds;
    use crate::outcome::Guidance;
    use std::io::Write;

    fn ids() -> Box<dyn IdSource> {
        Box::new(SequentialIds::default())
    }

    #[test]
    fn reads_both_lists() {
        let doc = r#"{
            "courses": [
                {"name": "Math", "grade": "A+"},
                {"name": "Physics", "grade": "a"},
                {"name": "Chemistry", "grade": "A-"}
            ],
            "terms": [
                {"label": "Year 1", "gpa": 3.8},
                {"label": "Year 2", "gpa": "3.20"},
                {"label": "Year 3", "gpa": 4}
            ]
        }"#;
        let batch = Batch::from_reader(doc.as_bytes()).unwrap();
        let mut courses = batch.course_sheet(CalcOptions::default(), ids()).unwrap();
        let mut terms = batch.term_sheet(CalcOptions::default(), ids()).unwrap();
        assert_eq!(courses.calculate().value(), Some(3.75));
        assert_eq!(terms.calculate().value(), Some(3.67));
    }

    #[test]
    fn missing_sections_and_fields_default() {
        let batch = Batch::from_reader(r#"{"terms": [{"label": "Fall"}, {}]}"#.as_bytes()).unwrap();
        assert!(batch.courses.is_empty());
        let mut terms = batch.term_sheet(CalcOptions::default(), ids()).unwrap();
        assert_eq!(terms.rows()[0].gpa, GpaInput::Unset);
        assert_eq!(terms.calculate().guidance(), Some(Guidance::IncompleteRows));

        let mut courses = batch.course_sheet(CalcOptions::default(), ids()).unwrap();
        assert!(courses.is_empty());
        assert_eq!(courses.calculate().guidance(), Some(Guidance::NothingEntered));
    }

    #[test]
    fn record_names_override_defaults() {
        let batch = Batch::from_reader(r#"{"courses": [{"grade": "B"}]}"#.as_bytes()).unwrap();
        let courses = batch.course_sheet(CalcOptions::default(), ids()).unwrap();
        assert_eq!(courses.rows()[0].name, "");
    }

    #[test]
    fn unknown_grade_is_an_error() {
        let batch = Batch::from_reader(r#"{"courses": [{"name": "X", "grade": "E"}]}"#.as_bytes())
            .unwrap();
        assert!(matches!(
            batch.course_sheet(CalcOptions::default(), ids()),
            Err(GradeError::UnknownGrade(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Batch::from_reader("{ nope".as_bytes()),
            Err(GradeError::Json(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"terms": [{{"label": "Y1", "gpa": "2.5"}}]}}"#).unwrap();
        let batch = Batch::load(f.path()).unwrap();
        let mut terms = batch.term_sheet(CalcOptions::default(), ids()).unwrap();
        assert_eq!(terms.calculate().value(), Some(2.5));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Batch::load(&dir.path().join("absent.json")),
            Err(GradeError::Io(_))
        ));
    }
}
