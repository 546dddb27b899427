//! A quiz session paired with its countdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::countdown::{Countdown, TICK_PERIOD};
use super::scoring::Grade;
use super::session::{QuizSession, SessionStatus, SubmitOutcome};
use crate::error::SessionError;
use crate::models::Quiz;

/// Session shared with the countdown task that times it.
///
/// Every operation takes the session lock, so user input and ticks never
/// interleave. The countdown is cancelled when the session completes, when
/// it is restarted, and when this value is dropped.
pub struct LiveSession {
    session: Arc<Mutex<QuizSession>>,
    countdown: Option<Countdown>,
    tick_period: Duration,
}

impl LiveSession {
    /// Start a session on `quiz`. Must be called inside a tokio runtime.
    pub fn start(quiz: Arc<Quiz>) -> Result<Self, SessionError> {
        Self::start_with_period(quiz, TICK_PERIOD)
    }

    pub fn start_with_period(quiz: Arc<Quiz>, tick_period: Duration) -> Result<Self, SessionError> {
        let session = QuizSession::start(quiz)?;
        let timed = session.quiz().is_timed();
        let session = Arc::new(Mutex::new(session));

        // A zero time limit means the quiz is untimed.
        let countdown = timed.then(|| Countdown::spawn(Arc::clone(&session), tick_period));

        Ok(Self {
            session,
            countdown,
            tick_period,
        })
    }

    /// Lock the session for reading, e.g. while rendering.
    pub async fn lock(&self) -> MutexGuard<'_, QuizSession> {
        self.session.lock().await
    }

    pub async fn snapshot(&self) -> QuizSession {
        self.session.lock().await.clone()
    }

    /// The shared session, as seen by the countdown task.
    pub fn shared(&self) -> Arc<Mutex<QuizSession>> {
        Arc::clone(&self.session)
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_running)
    }

    pub async fn select_answer(&self, option_index: usize) -> Result<(), SessionError> {
        self.session.lock().await.select_answer(option_index)
    }

    pub async fn submit_answer(&self) -> Result<SubmitOutcome, SessionError> {
        self.session.lock().await.submit_answer()
    }

    pub async fn advance(&mut self) -> Result<SessionStatus, SessionError> {
        let status = self.session.lock().await.advance()?;
        if status == SessionStatus::Completed {
            self.stop_countdown();
        }
        Ok(status)
    }

    pub async fn expire(&mut self) -> Result<(), SessionError> {
        self.session.lock().await.expire()?;
        self.stop_countdown();
        Ok(())
    }

    /// Replace the session with a fresh one on the same quiz.
    pub async fn restart(&mut self) -> Result<(), SessionError> {
        self.stop_countdown();
        let quiz = self.session.lock().await.quiz_arc();
        debug!(quiz_id = %quiz.id, "Restarting quiz session");
        *self = Self::start_with_period(quiz, self.tick_period)?;
        Ok(())
    }

    pub async fn grade(&self) -> Result<Grade, SessionError> {
        self.session.lock().await.grade()
    }

    fn stop_countdown(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CompletionReason;
    use crate::models::fixtures::quiz_with_points;

    fn quiz(points: &[u32], limit: u32) -> Arc<Quiz> {
        Arc::new(quiz_with_points(points, limit))
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_expiry_without_answers() {
        let live = LiveSession::start(quiz(&[10, 20], 1)).unwrap();
        assert!(live.has_countdown());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let session = live.snapshot().await;
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.completion(), Some(CompletionReason::TimeExpired));
        assert_eq!(session.score(), 0);
        assert_eq!(session.correct_count(), 0);
        assert!(session.answer_log().is_empty());
        assert!(session.grade().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_decrements_each_second() {
        let live = LiveSession::start(quiz(&[10], 5)).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(live.lock().await.time_remaining_seconds(), 3);
        assert!(live.lock().await.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_untimed_quiz_has_no_countdown() {
        let live = LiveSession::start(quiz(&[10], 0)).unwrap();
        assert!(!live.has_countdown());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(live.lock().await.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_cancels_countdown() {
        let mut live = LiveSession::start(quiz(&[10], 10)).unwrap();
        live.select_answer(0).await.unwrap();
        live.submit_answer().await.unwrap();
        assert_eq!(live.advance().await.unwrap(), SessionStatus::Completed);
        assert!(!live.has_countdown());

        let remaining = live.lock().await.time_remaining_seconds();
        tokio::time::sleep(Duration::from_secs(5)).await;
        let session = live.snapshot().await;
        assert_eq!(session.time_remaining_seconds(), remaining);
        assert_eq!(session.completion(), Some(CompletionReason::Finished));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_previous_countdown() {
        let mut live = LiveSession::start(quiz(&[10, 20], 10)).unwrap();
        live.select_answer(0).await.unwrap();
        live.submit_answer().await.unwrap();

        let stale = live.shared();
        live.restart().await.unwrap();

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(stale.lock().await.time_remaining_seconds(), 10);
        assert_eq!(stale.lock().await.score(), 10);

        let fresh = live.snapshot().await;
        assert_eq!(fresh.time_remaining_seconds(), 7);
        assert_eq!(fresh.score(), 0);
        assert!(fresh.answer_log().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_countdown() {
        let live = LiveSession::start(quiz(&[10], 10)).unwrap();
        let shared = live.shared();
        drop(live);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(shared.lock().await.time_remaining_seconds(), 10);
        assert!(shared.lock().await.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_expire_stops_countdown() {
        let mut live = LiveSession::start(quiz(&[10], 10)).unwrap();
        live.expire().await.unwrap();
        assert!(!live.has_countdown());
        assert!(live.expire().await.is_err());
        assert_eq!(live.grade().await.unwrap().percentage, 0);
    }
}
