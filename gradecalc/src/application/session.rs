//! Line-oriented form over both calculators.
//!
//! Rows are addressed by their 1-based position in the current tab and
//! resolved to row ids before touching the sheet.

use std::io::{BufRead, Write};

use gradecalc_core::error::{GradeError, Result};
use gradecalc_core::{
    CalcOptions, CourseSheet, Pipeline, RowEntry, RowId, Sheet, TermSheet,
};
use tracing::{debug, warn};

use super::handlers::{write_grade_table, write_outcome};

const HELP: &str = "\
commands:
  tab gpa|cgpa               switch calculator
  add                        append a row
  rm <n>                     remove row n (the last row stays)
  set <n> <field> [value]    edit a field; no value clears it
                             gpa fields: name, grade   cgpa fields: label, gpa
  calc                       calculate for the current tab
  list                       show rows and the last result
  grades                     show the grade point table
  help                       this text
  quit                       leave";

#[derive(Debug, PartialEq)]
enum Command {
    Tab(Pipeline),
    Sheet(SheetCommand),
    Grades,
    Help,
    Quit,
}

#[derive(Debug, PartialEq)]
enum SheetCommand {
    Add,
    Remove(usize),
    Set {
        row: usize,
        field: String,
        value: String,
    },
    Calc,
    List,
}

enum Flow {
    Continue,
    Quit,
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn parse_row(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GradeError::Input(format!("expected a row number, got {raw:?}"))),
    }
}

impl Command {
    /// `None` for blank lines.
    fn parse(line: &str) -> Result<Option<Command>> {
        let (word, rest) = split_word(line.trim_end());
        let cmd = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "tab" => Command::Tab(rest.parse()?),
            "add" => Command::Sheet(SheetCommand::Add),
            "rm" | "remove" => Command::Sheet(SheetCommand::Remove(parse_row(rest)?)),
            "set" => {
                let (row, rest) = split_word(rest);
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(GradeError::Input("usage: set <n> <field> [value]".into()));
                }
                Command::Sheet(SheetCommand::Set {
                    row: parse_row(row)?,
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "calc" | "calculate" => Command::Sheet(SheetCommand::Calc),
            "list" | "ls" => Command::Sheet(SheetCommand::List),
            "grades" => Command::Grades,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(GradeError::Input(format!("unknown command {other:?}; try help"))),
        };
        Ok(Some(cmd))
    }
}

pub struct Session {
    tab: Pipeline,
    courses: CourseSheet,
    terms: TermSheet,
    options: CalcOptions,
    json: bool,
}

impl Session {
    pub fn new(options: CalcOptions, json: bool) -> Self {
        Self::with_sheets(CourseSheet::new(options), TermSheet::new(options), json)
    }

    pub fn with_sheets(courses: CourseSheet, terms: TermSheet, json: bool) -> Self {
        let options = *courses.options();
        Self {
            tab: Pipeline::Gpa,
            courses,
            terms,
            options,
            json,
        }
    }

    pub fn tab(&self) -> Pipeline {
        self.tab
    }

    pub fn courses(&self) -> &CourseSheet {
        &self.courses
    }

    pub fn terms(&self) -> &TermSheet {
        &self.terms
    }

    /// Runs until `quit` or end of input. Command errors are reported and
    /// the loop carries on; only I/O failures end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "GPA & CGPA Calculator. Type `help` for commands.")?;
        self.prompt(out)?;
        for line in input.lines() {
            let line = line?;
            debug!(line = %line, "command");
            match self.execute(&line, out) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(GradeError::Io(e)) => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, "command rejected");
                    writeln!(out, "error: {e}")?;
                }
            }
            self.prompt(out)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}> ", self.tab)?;
        out.flush()?;
        Ok(())
    }

    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let Some(cmd) = Command::parse(line)? else {
            return Ok(Flow::Continue);
        };
        match cmd {
            Command::Tab(tab) => {
                self.tab = tab;
                match tab {
                    Pipeline::Gpa => list(&self.courses, out)?,
                    Pipeline::Cgpa => list(&self.terms, out)?,
                }
            }
            Command::Sheet(cmd) => match self.tab {
                Pipeline::Gpa => apply(&mut self.courses, cmd, out, self.json)?,
                Pipeline::Cgpa => apply(&mut self.terms, cmd, out, self.json)?,
            },
            Command::Grades => write_grade_table(out, &self.options, self.json)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn row_id<E: RowEntry>(sheet: &Sheet<E>, n: usize) -> Result<RowId> {
    sheet
        .id_at(n - 1)
        .cloned()
        .ok_or_else(|| GradeError::Input(format!("no row {n}")))
}

fn apply<E: RowEntry, W: Write>(
    sheet: &mut Sheet<E>,
    cmd: SheetCommand,
    out: &mut W,
    json: bool,
) -> Result<()> {
    match cmd {
        SheetCommand::Add => {
            sheet.add_row();
            list(sheet, out)
        }
        SheetCommand::Remove(n) => {
            let id = row_id(sheet, n)?;
            if !sheet.can_remove(&id) {
                return Err(GradeError::LastRow);
            }
            sheet.remove_row(&id)?;
            list(sheet, out)
        }
        SheetCommand::Set { row, field, value } => {
            let id = row_id(sheet, row)?;
            let field: E::Field = field.parse()?;
            sheet.update_field(&id, field, &value)?;
            list(sheet, out)
        }
        SheetCommand::Calc => write_outcome(out, sheet.calculate(), json),
        SheetCommand::List => list(sheet, out),
    }
}

fn list<E: RowEntry, W: Write>(sheet: &Sheet<E>, out: &mut W) -> Result<()> {
    match E::PIPELINE {
        Pipeline::Gpa => writeln!(
            out,
            "Courses ({} credits each):",
            sheet.options().credits_per_course
        )?,
        Pipeline::Cgpa => writeln!(out, "Year/Terms:")?,
    }
    if sheet.is_empty() {
        writeln!(out, "  (no rows)")?;
    }
    for (i, row) in sheet.rows().iter().enumerate() {
        writeln!(out, "  {}. {row}", i + 1)?;
    }
    if let Some(outcome) = sheet.outcome() {
        writeln!(out, "{outcome}")?;
    }
    Ok(())
}
