//! Take Mode: a student sitting a timed quiz.

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::QuizBackend;
use crate::error::{Error, Result};
use crate::models::{Question, Quiz, QuizKey};
use crate::protocol::AnswerRecord;

use super::answers::AnswerMap;
use super::navigation::Cursor;
use super::submit::{SubmitGuard, build_payload};
use super::timer::{Countdown, TickOutcome, Ticker};

/// What started a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Submitted(SubmitTrigger),
    /// The student left the screen without a successful submit.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Submitting(SubmitTrigger),
    Ended(SessionEnd),
}

/// A captured submit request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit {
    pub key: QuizKey,
    pub trigger: SubmitTrigger,
    pub answers: Vec<AnswerRecord>,
}

impl PendingSubmit {
    pub async fn send(&self, backend: &dyn QuizBackend) -> Result<()> {
        backend.submit_quiz(&self.key, &self.answers).await
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(SubmitTrigger),
    /// Another submit was already in flight or done.
    Skipped,
    Failed(Error),
}

/// State for one quiz attempt. Discarded when the attempt ends.
pub struct TakeSession {
    id: Uuid,
    key: QuizKey,
    quiz: Quiz,
    answers: AnswerMap,
    cursor: Cursor,
    countdown: Countdown,
    guard: SubmitGuard,
    phase: Phase,
    ticker: Option<Ticker>,
    last_error: Option<&'static str>,
}

impl TakeSession {
    pub fn new(key: QuizKey, quiz: Quiz) -> Result<Self> {
        if quiz.questions.is_empty() {
            return Err(Error::NoQuizData(format!("{} has no questions", key)));
        }
        if quiz.duration_minutes == 0 {
            return Err(Error::InvalidQuiz(format!("{} has no duration", key)));
        }

        let id = Uuid::new_v4();
        tracing::info!(
            session_id = %id,
            questions = quiz.question_count(),
            minutes = quiz.duration_minutes,
            "Starting take session for {}",
            key
        );

        Ok(Self {
            id,
            cursor: Cursor::new(quiz.question_count()),
            countdown: Countdown::from_minutes(quiz.duration_minutes),
            key,
            quiz,
            answers: AnswerMap::new(),
            guard: SubmitGuard::new(),
            phase: Phase::Active,
            ticker: None,
            last_error: None,
        })
    }

    /// Start the one-second cadence. Each tick sends `make_event()`, which the
    /// owner must feed back through [`TakeSession::on_tick`]. The cadence
    /// stops when the session ends or is dropped.
    pub fn start_cadence<E, F>(&mut self, events: mpsc::UnboundedSender<E>, make_event: F)
    where
        E: Send + 'static,
        F: Fn() -> E + Send + 'static,
    {
        if matches!(self.phase, Phase::Ended(_)) || self.countdown.is_expired() {
            return;
        }
        self.ticker = Some(Ticker::start(events, make_event));
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> &QuizKey {
        &self.key
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended(_))
    }

    pub fn has_cadence(&self) -> bool {
        self.ticker.is_some()
    }

    /// User-facing message from the last failed submit, if any.
    pub fn last_error(&self) -> Option<&'static str> {
        self.last_error
    }

    pub fn current_question(&self) -> &Question {
        // new() rejects empty quizzes and the cursor stays in range
        &self.quiz.questions[self.cursor.index()]
    }

    /// Answers may change only while active and before time runs out.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Active && !self.countdown.is_expired()
    }

    /// `(answered, total)` for "N of M answered".
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.progress_count(), self.quiz.question_count())
    }

    pub fn select(&mut self, question_id: &str, option_text: &str) -> bool {
        if !self.accepts_input() {
            tracing::debug!(session_id = %self.id, "Ignoring selection, input is closed");
            return false;
        }
        self.answers.select(question_id, option_text);
        true
    }

    /// Select an option of the displayed question by position.
    pub fn select_current(&mut self, option_index: usize) -> bool {
        let question = self.current_question();
        let Some(option) = question.options.get(option_index) else {
            return false;
        };
        let (question_id, option_text) = (question.id.clone(), option.text.clone());
        self.select(&question_id, &option_text)
    }

    pub fn clear(&mut self, question_id: &str) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.answers.clear(question_id).is_some()
    }

    pub fn clear_current(&mut self) -> bool {
        let question_id = self.current_question().id.clone();
        self.clear(&question_id)
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    pub fn prev(&mut self) {
        self.cursor.prev();
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.cursor.jump_to(index)
    }

    /// Advance the countdown by one second. Returns the forced submit when
    /// time has just run out and no other submit holds the guard.
    pub fn on_tick(&mut self) -> Option<PendingSubmit> {
        if self.is_ended() {
            return None;
        }
        match self.countdown.tick() {
            TickOutcome::Expired => {
                tracing::info!(session_id = %self.id, "Time is up");
                self.ticker = None;
                self.begin_submit(SubmitTrigger::Timeout)
            }
            TickOutcome::Running(_) => None,
            TickOutcome::Stopped => {
                self.ticker = None;
                None
            }
        }
    }

    /// Claim the submit guard and capture the payload.
    pub fn begin_submit(&mut self, trigger: SubmitTrigger) -> Option<PendingSubmit> {
        if self.is_ended() || !self.guard.acquire() {
            tracing::debug!(
                session_id = %self.id,
                ?trigger,
                "Submit already in flight or done, ignoring"
            );
            return None;
        }

        let answers = build_payload(&self.quiz, &self.answers);
        tracing::info!(
            session_id = %self.id,
            ?trigger,
            answered = answers.len(),
            total = self.quiz.question_count(),
            "Submitting quiz"
        );
        self.phase = Phase::Submitting(trigger);
        self.last_error = None;

        Some(PendingSubmit {
            key: self.key.clone(),
            trigger,
            answers,
        })
    }

    /// Record the backend's answer to the in-flight submit.
    pub fn finish_submit(&mut self, result: Result<()>) -> SubmitOutcome {
        let Phase::Submitting(trigger) = self.phase else {
            return SubmitOutcome::Skipped;
        };

        match result {
            Ok(()) => {
                self.guard.complete();
                self.end(SessionEnd::Submitted(trigger));
                SubmitOutcome::Submitted(trigger)
            }
            Err(err) => {
                tracing::error!(session_id = %self.id, ?trigger, "Submit failed: {}", err);
                self.guard.release();
                self.phase = Phase::Active;
                self.last_error = Some("Submitting failed. Press [S] to try again.");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Submit through `backend`, honoring the guard.
    pub async fn submit_with(
        &mut self,
        backend: &dyn QuizBackend,
        trigger: SubmitTrigger,
    ) -> SubmitOutcome {
        let Some(pending) = self.begin_submit(trigger) else {
            return SubmitOutcome::Skipped;
        };
        let result = pending.send(backend).await;
        self.finish_submit(result)
    }

    /// Leave the session without submitting. Refused while a submit is in
    /// flight; returns whether the session is now ended.
    pub fn abandon(&mut self) -> bool {
        match self.phase {
            Phase::Active => {
                self.end(SessionEnd::Abandoned);
                true
            }
            Phase::Submitting(trigger) => {
                tracing::info!(session_id = %self.id, ?trigger, "Not leaving, submit in flight");
                false
            }
            Phase::Ended(_) => true,
        }
    }

    fn end(&mut self, end: SessionEnd) {
        self.ticker = None;
        self.phase = Phase::Ended(end);
        tracing::info!(session_id = %self.id, ?end, "Take session ended");
    }
}
