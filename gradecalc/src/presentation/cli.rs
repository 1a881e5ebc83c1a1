use clap::{Parser, Subcommand};
use gradecalc_core::FIXED_CREDIT_VALUE_PER_COURSE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "GPA & CGPA calculator", long_about = None)]
pub struct Cli {
    /// Credit weight given to every course
    #[arg(long, global = true, default_value_t = FIXED_CREDIT_VALUE_PER_COURSE)]
    pub credits: u32,

    /// Print outcomes as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log calculation details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Semester GPA from course/grade pairs
    Gpa {
        /// one course row; either side may be empty (e.g. `Math=` or `=B+`)
        #[arg(long = "course", value_name = "NAME=GRADE", value_parser = parse_pair)]
        courses: Vec<(String, String)>,
    },

    /// Cumulative GPA from year-term/GPA pairs
    Cgpa {
        /// one year/term row; either side may be empty
        #[arg(long = "term", value_name = "LABEL=GPA", value_parser = parse_pair)]
        terms: Vec<(String, String)>,
    },

    /// Calculate both from a JSON file with `courses` and `terms` arrays
    Batch { file: PathBuf },

    /// Print the letter grade to grade point table
    Grades,

    /// Interactive form over both calculators (reads commands from stdin)
    Session,
}

/// Split `NAME=VALUE` at the last `=`, so names may themselves contain `=`.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.rsplit_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))
}
