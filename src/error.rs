//! Error types for the quiz engine, the catalog and the terminal runner.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::SessionStatus;

/// A quiz that cannot be played.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizDefinitionError {
    #[error("quiz '{quiz_id}' has no questions")]
    NoQuestions { quiz_id: String },

    #[error("quiz '{quiz_id}', question {question_id}: correct option index {index} is out of range")]
    CorrectOptionOutOfRange {
        quiz_id: String,
        question_id: u32,
        index: usize,
    },

    #[error("quiz '{quiz_id}' defines question id {question_id} more than once")]
    DuplicateQuestionId { quiz_id: String, question_id: u32 },
}

/// Rejected session operation. The session is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid quiz definition: {0}")]
    InvalidQuizDefinition(#[from] QuizDefinitionError),

    #[error("no answer selected")]
    NoAnswerSelected,

    #[error("cannot {operation} while session is {status}")]
    InvalidTransition {
        operation: &'static str,
        status: SessionStatus,
    },

    #[error("option index {index} is out of range")]
    OptionOutOfRange { index: usize },
}

/// Failure while loading a quiz catalog.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] QuizDefinitionError),

    #[error("quiz id '{0}' is defined more than once")]
    DuplicateQuizId(String),

    #[error("catalog contains no quizzes")]
    Empty,
}

/// Error type for running the quiz application.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("failed to load quizzes: {0}")]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("unknown quiz '{0}'")]
    UnknownQuiz(String),

    #[error("failed to set up logging: {0}")]
    Telemetry(String),
}
