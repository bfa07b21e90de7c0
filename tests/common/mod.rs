#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use school_quiz::api::QuizBackend;
use school_quiz::models::{QuizKey, ReviewKey, Viewer};
use school_quiz::protocol::{AnswerRecord, QuizResponse, SubmissionResponse};
use school_quiz::{Error, Result};
use serde_json::json;

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeBackend {
    pub quiz: Option<QuizResponse>,
    pub quiz_unreachable: bool,
    pub submission: Option<SubmissionResponse>,
    pub submission_unreachable: bool,
    /// Number of upcoming submit calls that fail.
    pub failing_submits: AtomicUsize,
    pub submit_calls: Mutex<Vec<Vec<AnswerRecord>>>,
    pub accepted: AtomicUsize,
    pub viewers: Mutex<Vec<Viewer>>,
}

impl FakeBackend {
    pub fn with_quiz(quiz: QuizResponse) -> Self {
        Self {
            quiz: Some(quiz),
            ..Default::default()
        }
    }

    pub fn with_submission(submission: SubmissionResponse) -> Self {
        Self {
            submission: Some(submission),
            ..Default::default()
        }
    }

    pub fn fail_next_submits(&self, count: usize) {
        self.failing_submits.store(count, Ordering::SeqCst);
    }

    pub fn submit_attempts(&self) -> usize {
        self.submit_calls.lock().unwrap().len()
    }

    pub fn accepted_submits(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Vec<AnswerRecord> {
        self.submit_calls.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

fn unavailable(what: &str) -> Error {
    Error::Status {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        url: format!("fake://{}", what),
    }
}

#[async_trait]
impl QuizBackend for FakeBackend {
    async fn fetch_quiz(&self, _key: &QuizKey) -> Result<Option<QuizResponse>> {
        if self.quiz_unreachable {
            return Err(unavailable("quiz"));
        }
        Ok(self.quiz.clone())
    }

    async fn submit_quiz(&self, _key: &QuizKey, answers: &[AnswerRecord]) -> Result<()> {
        self.submit_calls.lock().unwrap().push(answers.to_vec());
        let failing = self.failing_submits.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_submits.store(failing - 1, Ordering::SeqCst);
            return Err(unavailable("submit"));
        }
        self.accepted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_submission(
        &self,
        viewer: Viewer,
        _key: &ReviewKey,
    ) -> Result<Option<SubmissionResponse>> {
        self.viewers.lock().unwrap().push(viewer);
        if self.submission_unreachable {
            return Err(unavailable("submission"));
        }
        Ok(self.submission.clone())
    }
}

pub fn quiz_key() -> QuizKey {
    QuizKey::new("bio-101", "7")
}

/// A quiz with `questions` questions of two options each ("A" and "B").
pub fn quiz_response(minutes: u32, questions: usize) -> QuizResponse {
    let questions: Vec<_> = (1..=questions)
        .map(|n| {
            json!({
                "id": format!("q{}", n),
                "text": format!("Question {}", n),
                "points": 5,
                "options": [
                    {"id": format!("q{}-a", n), "text": "A"},
                    {"id": format!("q{}-b", n), "text": "B"}
                ]
            })
        })
        .collect();

    serde_json::from_value(json!({
        "id": 7,
        "title": "Cell Biology",
        "description": "Unit 2 check",
        "duration": minutes,
        "total_points": 5 * questions.len(),
        "questions": questions
    }))
    .unwrap()
}
