use crossterm::event::KeyCode;
use tracing::debug;

use crate::data::Catalog;
use crate::engine::{LiveSession, QuizSession, SessionStatus, SessionSummary, SubmitOutcome};
use crate::error::{QuizError, SessionError};
use crate::models::{AppState, NUM_OPTIONS};

const NOTICE_NO_SELECTION: &str = "Choisissez une réponse avant de valider.";

/// Screen state of the terminal front end. The quiz rules live in the session.
pub struct App {
    pub state: AppState,
    catalog: Catalog,
    menu_index: usize,
    session: Option<LiveSession>,
    highlighted_option: Option<usize>,
    feedback: Option<SubmitOutcome>,
    notice: Option<String>,
    result_scroll: usize,
    last_summary: Option<SessionSummary>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            state: AppState::Menu,
            catalog,
            menu_index: 0,
            session: None,
            highlighted_option: None,
            feedback: None,
            notice: None,
            result_scroll: 0,
            last_summary: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn highlighted_option(&self) -> Option<usize> {
        self.highlighted_option
    }

    pub fn feedback(&self) -> Option<&SubmitOutcome> {
        self.feedback.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Copy of the current session for rendering.
    pub async fn view(&self) -> Option<QuizSession> {
        match &self.session {
            Some(live) => Some(live.snapshot().await),
            None => None,
        }
    }

    pub fn select_next_quiz(&mut self) {
        let len = self.catalog.len().max(1);
        self.menu_index = (self.menu_index + 1) % len;
    }

    pub fn select_previous_quiz(&mut self) {
        let len = self.catalog.len().max(1);
        self.menu_index = (self.menu_index + len - 1) % len;
    }

    pub fn start_quiz(&mut self, index: usize) -> Result<(), QuizError> {
        let quiz = self
            .catalog
            .quizzes()
            .get(index)
            .cloned()
            .ok_or_else(|| QuizError::UnknownQuiz(format!("#{}", index + 1)))?;

        // Stop the previous countdown before the new one starts.
        self.session.take();
        self.session = Some(LiveSession::start(quiz)?);
        self.menu_index = index;
        self.result_scroll = 0;
        self.reset_question_view();
        self.state = AppState::Quiz;
        Ok(())
    }

    pub fn start_quiz_by_id(&mut self, id: &str) -> Result<(), QuizError> {
        let index = self
            .catalog
            .position(id)
            .ok_or_else(|| QuizError::UnknownQuiz(id.to_string()))?;
        self.start_quiz(index)
    }

    /// Switch to the result screen once the session has completed, e.g. on expiry.
    pub async fn sync(&mut self) -> Result<(), QuizError> {
        if self.state != AppState::Quiz {
            return Ok(());
        }
        let Some(live) = &self.session else {
            return Ok(());
        };

        let summary = {
            let session = live.lock().await;
            if !session.is_completed() {
                return Ok(());
            }
            session.summary()?
        };
        self.finish(summary);
        Ok(())
    }

    pub async fn choose_option(&mut self, index: usize) {
        let Some(live) = &self.session else {
            return;
        };

        match live.select_answer(index).await {
            Ok(()) => {
                self.highlighted_option = Some(index);
                self.notice = None;
            }
            Err(SessionError::InvalidTransition { .. }) => {
                debug!(index, "Selection ignored after reveal");
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    pub async fn highlight_next_option(&mut self) {
        let next = match self.highlighted_option {
            Some(i) => (i + 1) % NUM_OPTIONS,
            None => 0,
        };
        self.choose_option(next).await;
    }

    pub async fn highlight_previous_option(&mut self) {
        let previous = match self.highlighted_option {
            Some(i) => (i + NUM_OPTIONS - 1) % NUM_OPTIONS,
            None => NUM_OPTIONS - 1,
        };
        self.choose_option(previous).await;
    }

    /// Submit the selection, or move on once the answer is revealed.
    pub async fn confirm(&mut self) -> Result<(), QuizError> {
        let Some(live) = self.session.as_mut() else {
            return Ok(());
        };

        let revealed = live.lock().await.answer_revealed();
        if !revealed {
            match live.submit_answer().await {
                Ok(outcome) => {
                    self.feedback = Some(outcome);
                    self.notice = None;
                }
                Err(SessionError::NoAnswerSelected) => {
                    self.notice = Some(NOTICE_NO_SELECTION.to_string());
                }
                Err(e) => debug!(error = %e, "Submission rejected"),
            }
            return Ok(());
        }

        match live.advance().await {
            Ok(SessionStatus::Completed) => {
                let summary = live.lock().await.summary()?;
                self.finish(summary);
            }
            Ok(_) => self.reset_question_view(),
            Err(e) => debug!(error = %e, "Advance rejected"),
        }
        Ok(())
    }

    pub async fn restart(&mut self) -> Result<(), QuizError> {
        let Some(live) = self.session.as_mut() else {
            return Ok(());
        };
        live.restart().await?;
        self.result_scroll = 0;
        self.reset_question_view();
        self.state = AppState::Quiz;
        Ok(())
    }

    /// Abandon the current session, cancelling its countdown.
    pub fn back_to_menu(&mut self) {
        self.session = None;
        self.reset_question_view();
        self.state = AppState::Menu;
    }

    pub fn scroll_results_down(&mut self) {
        let total = self
            .last_summary
            .as_ref()
            .map_or(0, |s| s.total_questions);
        let max_scroll = total.saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn reset_question_view(&mut self) {
        self.highlighted_option = None;
        self.feedback = None;
        self.notice = None;
    }

    fn finish(&mut self, summary: SessionSummary) {
        self.last_summary = Some(summary);
        self.result_scroll = 0;
        self.reset_question_view();
        self.state = AppState::Result;
    }

    /// Returns true if the app should exit.
    pub async fn handle_key(&mut self, key: KeyCode) -> Result<bool, QuizError> {
        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            AppState::Quiz => self.handle_quiz_key(key).await,
            AppState::Result => self.handle_result_key(key).await,
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) -> Result<bool, QuizError> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_quiz(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_quiz(),
            KeyCode::Enter | KeyCode::Char(' ') => self.start_quiz(self.menu_index)?,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    async fn handle_quiz_key(&mut self, key: KeyCode) -> Result<bool, QuizError> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.highlight_previous_option().await,
            KeyCode::Down | KeyCode::Char('j') => self.highlight_next_option().await,
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.choose_option(index).await;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.confirm().await?,
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart().await?,
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => self.back_to_menu(),
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    async fn handle_result_key(&mut self, key: KeyCode) -> Result<bool, QuizError> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_results_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_results_up(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart().await?,
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => self.back_to_menu(),
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
            _ => {}
        }
        Ok(false)
    }
}
