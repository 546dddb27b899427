//! # quiz-session
//!
//! Timed multiple-choice quizzes with streak bonuses and letter grades.
//!
//! The [`engine`] module holds the rules and can be used without any UI:
//!
//! ```rust
//! use std::sync::Arc;
//! use quiz_session::{Catalog, QuizSession};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let quiz = catalog.get("javascript").unwrap();
//! let mut session = QuizSession::start(Arc::clone(&quiz)).unwrap();
//!
//! session.select_answer(2).unwrap();
//! let outcome = session.submit_answer().unwrap();
//! assert!(outcome.is_correct);
//! assert_eq!(session.score(), 10);
//! ```
//!
//! [`QuizRunner`] plays a catalog in the terminal:
//!
//! ```rust,no_run
//! use quiz_session::{Catalog, QuizError, QuizRunner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let runner = QuizRunner::new(Catalog::builtin()?);
//!     runner.run().await?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod engine;
mod error;
mod models;
pub mod telemetry;
pub mod terminal;
mod ui;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

pub use app::App;
pub use data::{load_catalog_from_json, parse_catalog, Catalog};
pub use engine::{
    AnswerRecord, CompletionReason, Grade, GradeLetter, LiveSession, QuizSession, SessionStatus,
    SessionSummary, SubmitOutcome,
};
pub use error::{LoadError, QuizDefinitionError, QuizError, SessionError};
pub use models::{AppState, Difficulty, Question, Quiz, NUM_OPTIONS};

/// Redraw interval; keeps the countdown display moving between key presses.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Plays quizzes from a catalog in the terminal.
pub struct QuizRunner {
    app: App,
}

impl QuizRunner {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            app: App::new(catalog),
        }
    }

    /// Skip the menu and open `quiz_id` directly.
    ///
    /// Must be called inside a tokio runtime when the quiz is timed.
    pub fn with_quiz(mut self, quiz_id: &str) -> Result<Self, QuizError> {
        self.app.start_quiz_by_id(quiz_id)?;
        Ok(self)
    }

    /// Take over the terminal until the user quits.
    ///
    /// Returns the summary of the last completed session, if any.
    pub async fn run(mut self) -> Result<Option<SessionSummary>, QuizError> {
        let mut guard = terminal::TerminalGuard::new()?;
        let result = run_event_loop(guard.terminal(), &mut self.app).await;
        guard.restore()?;
        result?;

        info!(completed = self.app.last_summary().is_some(), "Quiz runner exited");
        Ok(self.app.last_summary().cloned())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        app.sync().await?;

        let view = app.view().await;
        terminal.draw(|frame| ui::render(frame, app, view.as_ref()))?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if app.handle_key(key.code).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}
