//! The quiz session state machine.
//!
//! A [`QuizSession`] is a plain value: every operation either applies fully
//! or returns a [`SessionError`] without touching any field. Timing is driven
//! from outside through [`QuizSession::tick`], see [`crate::engine::LiveSession`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::scoring::{self, Grade};
use crate::error::SessionError;
use crate::models::{Question, Quiz, NUM_OPTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    Active,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::NotStarted => "not started",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// How a session reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// Advanced past the last question.
    Finished,
    /// Ran out of time.
    TimeExpired,
}

/// One submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question_id: u32,
    pub selected_index: usize,
    pub was_correct: bool,
    pub earned_points: u32,
}

/// Feedback for a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub is_correct: bool,
    pub earned_points: u32,
    pub bonus_multiplier: f64,
    pub correct_option_index: usize,
    pub explanation: String,
}

/// Serializable snapshot of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub quiz_id: String,
    pub score: u32,
    pub correct_count: usize,
    pub total_questions: usize,
    pub max_streak: u32,
    pub time_remaining_seconds: u32,
    pub completion: Option<CompletionReason>,
    pub grade: Grade,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    quiz: Arc<Quiz>,
    current_question_index: usize,
    selected_answer_index: Option<usize>,
    answer_revealed: bool,
    score: u32,
    correct_count: usize,
    streak: u32,
    max_streak: u32,
    time_remaining_seconds: u32,
    answer_log: Vec<AnswerRecord>,
    status: SessionStatus,
    completion: Option<CompletionReason>,
}

impl QuizSession {
    /// Validate `quiz` and open a new active session on it.
    pub fn start(quiz: Arc<Quiz>) -> Result<Self, SessionError> {
        quiz.validate()?;

        let session = Self {
            id: Uuid::new_v4(),
            current_question_index: 0,
            selected_answer_index: None,
            answer_revealed: false,
            score: 0,
            correct_count: 0,
            streak: 0,
            max_streak: 0,
            time_remaining_seconds: quiz.time_limit_seconds,
            answer_log: Vec::with_capacity(quiz.total_questions()),
            status: SessionStatus::Active,
            completion: None,
            quiz,
        };

        info!(
            session_id = %session.id,
            quiz_id = %session.quiz.id,
            questions = session.quiz.total_questions(),
            time_limit = session.quiz.time_limit_seconds,
            "Quiz session started"
        );

        Ok(session)
    }

    /// A fresh session on the same quiz. Nothing carries over.
    pub fn restart(&self) -> Result<Self, SessionError> {
        Self::start(Arc::clone(&self.quiz))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn quiz_arc(&self) -> Arc<Quiz> {
        Arc::clone(&self.quiz)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn completion(&self) -> Option<CompletionReason> {
        self.completion
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question(&self) -> &Question {
        // Index is kept in bounds by `advance` and the quiz is never empty.
        &self.quiz.questions[self.current_question_index]
    }

    pub fn selected_answer_index(&self) -> Option<usize> {
        self.selected_answer_index
    }

    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    pub fn time_remaining_seconds(&self) -> u32 {
        self.time_remaining_seconds
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_index + 1 >= self.quiz.total_questions()
    }

    /// Multiplier the next correct answer would get.
    pub fn next_bonus_multiplier(&self) -> f64 {
        scoring::bonus_multiplier(self.streak)
    }

    fn ensure_active(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.status != SessionStatus::Active {
            return Err(SessionError::InvalidTransition {
                operation,
                status: self.status,
            });
        }
        Ok(())
    }

    fn ensure_unrevealed(&self, operation: &'static str) -> Result<(), SessionError> {
        self.ensure_active(operation)?;
        if self.answer_revealed {
            return Err(SessionError::InvalidTransition {
                operation,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Provisionally pick an option. Can be changed until submission.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), SessionError> {
        self.ensure_unrevealed("select an answer")?;
        if option_index >= NUM_OPTIONS {
            return Err(SessionError::OptionOutOfRange {
                index: option_index,
            });
        }
        self.selected_answer_index = Some(option_index);
        Ok(())
    }

    /// Lock in the selected option and score it.
    pub fn submit_answer(&mut self) -> Result<SubmitOutcome, SessionError> {
        self.ensure_unrevealed("submit an answer")?;
        let selected = self
            .selected_answer_index
            .ok_or(SessionError::NoAnswerSelected)?;

        let question = &self.quiz.questions[self.current_question_index];
        let is_correct = question.is_correct(selected);
        let bonus_multiplier = scoring::bonus_multiplier(self.streak);

        let earned_points = if is_correct {
            let earned = scoring::earned_points(question.points, self.streak);
            self.score = self.score.saturating_add(earned);
            self.correct_count += 1;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
            earned
        } else {
            self.streak = 0;
            0
        };

        self.answer_log.push(AnswerRecord {
            question_id: question.id,
            selected_index: selected,
            was_correct: is_correct,
            earned_points,
        });
        self.answer_revealed = true;

        debug!(
            session_id = %self.id,
            question_id = question.id,
            is_correct,
            earned_points,
            bonus_multiplier,
            score = self.score,
            streak = self.streak,
            "Answer submitted"
        );

        Ok(SubmitOutcome {
            is_correct,
            earned_points,
            bonus_multiplier,
            correct_option_index: question.correct_option_index,
            explanation: question.explanation.clone(),
        })
    }

    /// Move past a revealed question, completing the session after the last one.
    pub fn advance(&mut self) -> Result<SessionStatus, SessionError> {
        self.ensure_active("advance")?;
        if !self.answer_revealed {
            return Err(SessionError::InvalidTransition {
                operation: "advance before revealing the answer",
                status: self.status,
            });
        }

        if self.is_last_question() {
            self.complete(CompletionReason::Finished);
        } else {
            self.current_question_index += 1;
            self.selected_answer_index = None;
            self.answer_revealed = false;
        }

        Ok(self.status)
    }

    /// Force completion because time ran out.
    pub fn expire(&mut self) -> Result<(), SessionError> {
        self.ensure_active("expire")?;
        self.time_remaining_seconds = 0;
        self.complete(CompletionReason::TimeExpired);
        Ok(())
    }

    /// One countdown step. Returns `true` while the session is still running.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }

        self.time_remaining_seconds = self.time_remaining_seconds.saturating_sub(1);
        if self.time_remaining_seconds == 0 {
            // Active was checked above, so this cannot be rejected.
            let _ = self.expire();
            return false;
        }

        true
    }

    fn complete(&mut self, reason: CompletionReason) {
        self.status = SessionStatus::Completed;
        self.completion = Some(reason);
        info!(
            session_id = %self.id,
            quiz_id = %self.quiz.id,
            reason = ?reason,
            score = self.score,
            correct = self.correct_count,
            total = self.quiz.total_questions(),
            "Quiz session completed"
        );
    }

    pub fn grade(&self) -> Result<Grade, SessionError> {
        if !self.is_completed() {
            return Err(SessionError::InvalidTransition {
                operation: "grade",
                status: self.status,
            });
        }
        Ok(Grade::compute(
            self.correct_count,
            self.quiz.total_questions(),
        ))
    }

    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        let grade = self.grade()?;
        Ok(SessionSummary {
            session_id: self.id,
            quiz_id: self.quiz.id.clone(),
            score: self.score,
            correct_count: self.correct_count,
            total_questions: self.quiz.total_questions(),
            max_streak: self.max_streak,
            time_remaining_seconds: self.time_remaining_seconds,
            completion: self.completion,
            grade,
            answers: self.answer_log.clone(),
        })
    }
}
