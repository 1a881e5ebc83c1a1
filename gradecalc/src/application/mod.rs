pub mod handlers;
pub mod session;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use gradecalc_core::CalcOptions;
use gradecalc_core::error::Result;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = CalcOptions::with_credits(cli.credits);
    let json = cli.json;
    match cli.command {
        Commands::Gpa { courses } => handlers::handle_gpa(courses, options, json),
        Commands::Cgpa { terms } => handlers::handle_cgpa(terms, options, json),
        Commands::Batch { file } => handlers::handle_batch(file, options, json),
        Commands::Grades => handlers::handle_grades(options, json),
        Commands::Session => handlers::handle_session(options, json),
    }
}

/// stderr only; stdout carries results.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
