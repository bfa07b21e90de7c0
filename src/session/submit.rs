//! Submit payload construction and the at-most-once submit guard.

use crate::models::Quiz;
use crate::protocol::AnswerRecord;

use super::answers::AnswerMap;

/// Build the submit body from the answer map.
///
/// Records follow the quiz's question order. Unanswered questions are
/// omitted. Entries whose question or option cannot be resolved are skipped
/// with a warning so the rest of the attempt still goes through.
pub fn build_payload(quiz: &Quiz, answers: &AnswerMap) -> Vec<AnswerRecord> {
    for (question_id, _) in answers.iter() {
        if quiz.question(question_id).is_none() {
            tracing::warn!(
                question_id,
                quiz_id = %quiz.id,
                "Dropping answer for a question that is not part of the quiz"
            );
        }
    }

    quiz.questions
        .iter()
        .filter_map(|question| {
            let chosen_text = answers.get(&question.id)?;
            let Some(option) = question.option_by_text(chosen_text) else {
                tracing::warn!(
                    question_id = %question.id,
                    chosen_text,
                    "Dropping answer whose option text matches no option"
                );
                return None;
            };
            Some(AnswerRecord {
                question_id: question.id.clone(),
                chosen_option_id: option.id.clone(),
                chosen_option_text: option.text.clone(),
                question_text: question.text.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    Open,
    InFlight,
    Done,
}

/// Ensures at most one submit request is in flight or completed per session.
///
/// A failed request releases the guard so the student can retry.
#[derive(Debug)]
pub struct SubmitGuard {
    state: GuardState,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self {
            state: GuardState::Open,
        }
    }

    /// Claim the right to send. Returns `false` if a request is already in
    /// flight or has succeeded.
    pub fn acquire(&mut self) -> bool {
        if self.state == GuardState::Open {
            self.state = GuardState::InFlight;
            true
        } else {
            false
        }
    }

    /// The in-flight request failed.
    pub fn release(&mut self) {
        if self.state == GuardState::InFlight {
            self.state = GuardState::Open;
        }
    }

    /// The in-flight request succeeded. Permanent.
    pub fn complete(&mut self) {
        if self.state == GuardState::InFlight {
            self.state = GuardState::Done;
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == GuardState::InFlight
    }

    pub fn is_done(&self) -> bool {
        self.state == GuardState::Done
    }
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new()
    }
}
