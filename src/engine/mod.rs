//! Quiz session engine: scoring, the session state machine and its countdown.

mod countdown;
mod live;
mod scoring;
mod session;

pub use countdown::{Countdown, TICK_PERIOD};
pub use live::LiveSession;
pub use scoring::{bonus_multiplier, earned_points, percentage, Grade, GradeLetter};
pub use session::{
    AnswerRecord, CompletionReason, QuizSession, SessionStatus, SessionSummary, SubmitOutcome,
};
