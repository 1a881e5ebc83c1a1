use std::io::Write;
use std::path::{Path, PathBuf};

use gradecalc_core::batch::{CourseRecord, GpaValue, TermRecord};
use gradecalc_core::error::Result;
use gradecalc_core::{Batch, CalcOptions, LetterGrade, Outcome, UuidIds};
use serde_json::json;
use tracing::info;

use super::session::Session;

pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &outcome.report())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{outcome}")?;
    }
    Ok(())
}

pub fn write_grade_table<W: Write>(out: &mut W, options: &CalcOptions, json: bool) -> Result<()> {
    if json {
        let grades: Vec<_> = LetterGrade::ALL
            .iter()
            .map(|g| json!({ "grade": g, "point": g.point() }))
            .collect();
        let doc = json!({ "grades": grades, "credits_per_course": options.credits_per_course });
        serde_json::to_writer(&mut *out, &doc)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "Letter Grade to Grade Point Mapping:")?;
    for g in LetterGrade::ALL {
        writeln!(out, "  {:<3} {:.2}", g.as_str(), g.point())?;
    }
    writeln!(
        out,
        "Note: Each course is assumed to have {} credits for GPA calculation.",
        options.credits_per_course
    )?;
    Ok(())
}

pub fn gpa_outcome(courses: Vec<(String, String)>, options: CalcOptions) -> Result<Outcome> {
    let batch = Batch {
        courses: courses
            .into_iter()
            .map(|(name, grade)| CourseRecord {
                name,
                grade: Some(grade),
            })
            .collect(),
        ..Default::default()
    };
    let mut sheet = batch.course_sheet(options, Box::new(UuidIds))?;
    Ok(sheet.calculate().clone())
}

pub fn cgpa_outcome(terms: Vec<(String, String)>, options: CalcOptions) -> Result<Outcome> {
    let batch = Batch {
        terms: terms
            .into_iter()
            .map(|(label, gpa)| TermRecord {
                label,
                gpa: Some(GpaValue::Text(gpa)),
            })
            .collect(),
        ..Default::default()
    };
    let mut sheet = batch.term_sheet(options, Box::new(UuidIds))?;
    Ok(sheet.calculate().clone())
}

/// GPA then CGPA for every row in the file.
pub fn batch_outcomes(file: &Path, options: CalcOptions) -> Result<[Outcome; 2]> {
    let batch = Batch::load(file)?;
    info!(
        file = %file.display(),
        courses = batch.courses.len(),
        terms = batch.terms.len(),
        "batch loaded"
    );
    let mut courses = batch.course_sheet(options, Box::new(UuidIds))?;
    let mut terms = batch.term_sheet(options, Box::new(UuidIds))?;
    Ok([courses.calculate().clone(), terms.calculate().clone()])
}

pub fn handle_gpa(courses: Vec<(String, String)>, options: CalcOptions, json: bool) -> Result<()> {
    let outcome = gpa_outcome(courses, options)?;
    write_outcome(&mut std::io::stdout().lock(), &outcome, json)
}

pub fn handle_cgpa(terms: Vec<(String, String)>, options: CalcOptions, json: bool) -> Result<()> {
    let outcome = cgpa_outcome(terms, options)?;
    write_outcome(&mut std::io::stdout().lock(), &outcome, json)
}

pub fn handle_batch(file: PathBuf, options: CalcOptions, json: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for outcome in batch_outcomes(&file, options)? {
        write_outcome(&mut out, &outcome, json)?;
    }
    Ok(())
}

pub fn handle_grades(options: CalcOptions, json: bool) -> Result<()> {
    write_grade_table(&mut std::io::stdout().lock(), &options, json)
}

pub fn handle_session(options: CalcOptions, json: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let mut out = std::io::stdout().lock();
    Session::new(options, json).run(stdin.lock(), &mut out)
}
