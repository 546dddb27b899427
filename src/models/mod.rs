mod question;
mod quiz;

pub use question::{Difficulty, Question, NUM_OPTIONS};
pub use quiz::Quiz;

#[cfg(test)]
pub(crate) use quiz::fixtures;

/// Which screen the terminal front end is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    Result,
}
