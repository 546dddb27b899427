//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::data::Catalog;
use crate::error::LoadError;

#[derive(Parser, Debug, Clone, Default)]
#[command(version, about = "Timed multiple-choice quizzes with streak bonuses", long_about = None)]
pub struct Args {
    /// JSON catalog to load quizzes from (defaults to the built-in catalog)
    #[arg(short, long, env = "QUIZ_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Start this quiz directly instead of showing the menu
    #[arg(short, long)]
    pub quiz: Option<String>,

    /// Print the available quizzes and exit
    #[arg(short, long)]
    pub list: bool,

    /// Print the last completed session as JSON on exit
    #[arg(short, long)]
    pub summary: bool,

    /// Append logs to this file
    #[arg(long, env = "QUIZ_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `quiz_session=trace`
    #[arg(long, env = "QUIZ_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn load_catalog(&self) -> Result<Catalog, LoadError> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }
}
