//! Cancellable once-per-period countdown driving [`QuizSession::tick`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::session::QuizSession;

/// Period of a real quiz countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running countdown task. Aborts the task when cancelled or dropped.
pub struct Countdown {
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Spawn the countdown on the current tokio runtime.
    ///
    /// The first tick fires one `period` after the call. The task ends by itself
    /// once the session stops running.
    pub fn spawn(session: Arc<Mutex<QuizSession>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let mut session = session.lock().await;
                if !session.tick() {
                    debug!(session_id = %session.id(), "Countdown finished");
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!("Countdown cancelled");
            }
            handle.abort();
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
