//! The quiz session engine: Take Mode and Review Mode.

mod answers;
mod bootstrap;
mod navigation;
mod review;
mod submit;
mod take;
mod timer;

pub use answers::AnswerMap;
pub use bootstrap::{bootstrap_review, bootstrap_take};
pub use navigation::Cursor;
pub use review::{
    ChoiceMark, MarkAudit, QuestionIssue, Review, ReviewedChoice, ReviewedQuestion, classify,
    points_earned,
};
pub use submit::{SubmitGuard, build_payload};
pub use take::{Phase, PendingSubmit, SessionEnd, SubmitOutcome, SubmitTrigger, TakeSession};
pub use timer::{Countdown, TickOutcome, Ticker, format_clock};
