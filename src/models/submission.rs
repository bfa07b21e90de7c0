use chrono::{DateTime, Utc};

use super::ReviewKey;

/// A graded submission as returned by the backend for review.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub key: ReviewKey,
    pub title: String,
    pub description: String,
    pub total_points: f64,
    /// Overall mark as reported by the backend.
    pub mark: f64,
    pub submitted_at: Option<DateTime<Utc>>,
    pub questions: Vec<GradedQuestion>,
}

/// One question of a graded submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedQuestion {
    pub text: String,
    pub points: f64,
    pub choices: Vec<String>,
    /// `None` when the student left the question unanswered.
    pub chosen: Option<String>,
    pub correct: String,
}
