//! Review Mode: re-derive correctness and points of a graded submission.
//!
//! The same reconstruction serves a student reading their own result, a
//! teacher inspecting a student, and a parent inspecting their child. Only
//! the [`Viewer`] differs.

use chrono::{DateTime, Utc};

use crate::models::{GradedQuestion, ReviewKey, Submission, Viewer};

use super::navigation::Cursor;

/// Tolerance when comparing fractional point totals.
const MARK_EPSILON: f64 = 1e-6;

/// How one choice of a reviewed question is shown. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    ChosenCorrect,
    ChosenIncorrect,
    /// The correct answer, which the student did not pick.
    MissedCorrect,
    Plain,
}

pub fn classify(choice: &str, chosen: Option<&str>, correct: &str) -> ChoiceMark {
    let is_chosen = chosen == Some(choice);
    let is_correct = choice == correct;
    match (is_chosen, is_correct) {
        (true, true) => ChoiceMark::ChosenCorrect,
        (true, false) => ChoiceMark::ChosenIncorrect,
        (false, true) => ChoiceMark::MissedCorrect,
        (false, false) => ChoiceMark::Plain,
    }
}

/// Full points when the chosen text equals the correct text, else zero.
pub fn points_earned(question: &GradedQuestion) -> f64 {
    if question.chosen.as_deref() == Some(question.correct.as_str()) {
        question.points
    } else {
        0.0
    }
}

/// Data problems found in one graded question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionIssue {
    CorrectAnswerNotAmongChoices,
    ChosenAnswerNotAmongChoices,
}

/// Recomputed total against the backend's reported mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkAudit {
    Consistent { mark: f64 },
    /// Neither figure is trusted over the other; both are surfaced.
    Mismatch { reported: f64, recomputed: f64 },
}

impl MarkAudit {
    pub fn is_consistent(&self) -> bool {
        matches!(self, MarkAudit::Consistent { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewedChoice {
    pub text: String,
    pub mark: ChoiceMark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewedQuestion {
    pub text: String,
    pub points: f64,
    pub earned: f64,
    pub chosen: Option<String>,
    pub correct: String,
    pub choices: Vec<ReviewedChoice>,
    pub issues: Vec<QuestionIssue>,
}

impl ReviewedQuestion {
    fn reconstruct(question: &GradedQuestion) -> Self {
        let chosen = question.chosen.as_deref();
        let choices = question
            .choices
            .iter()
            .map(|choice| ReviewedChoice {
                text: choice.clone(),
                mark: classify(choice, chosen, &question.correct),
            })
            .collect();

        let mut issues = Vec::new();
        if !question.choices.iter().any(|c| *c == question.correct) {
            issues.push(QuestionIssue::CorrectAnswerNotAmongChoices);
        }
        if let Some(chosen) = chosen {
            if !question.choices.iter().any(|c| c == chosen) {
                issues.push(QuestionIssue::ChosenAnswerNotAmongChoices);
            }
        }

        Self {
            text: question.text.clone(),
            points: question.points,
            earned: points_earned(question),
            chosen: question.chosen.clone(),
            correct: question.correct.clone(),
            choices,
            issues,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.chosen.as_deref() == Some(self.correct.as_str())
    }
}

/// Read-only review of one graded submission.
#[derive(Debug, Clone)]
pub struct Review {
    viewer: Viewer,
    key: ReviewKey,
    title: String,
    description: String,
    total_points: f64,
    submitted_at: Option<DateTime<Utc>>,
    reported_mark: f64,
    questions: Vec<ReviewedQuestion>,
    audit: MarkAudit,
    cursor: Cursor,
}

impl Review {
    pub fn new(viewer: Viewer, submission: Submission) -> Self {
        let questions: Vec<ReviewedQuestion> = submission
            .questions
            .iter()
            .map(ReviewedQuestion::reconstruct)
            .collect();
        let recomputed: f64 = questions.iter().map(|q| q.earned).sum();
        let audit = audit_mark(submission.mark, recomputed);

        if let MarkAudit::Mismatch {
            reported,
            recomputed,
        } = audit
        {
            tracing::warn!(
                %viewer,
                reported,
                recomputed,
                "Reported mark for {} does not match recomputed points",
                submission.key
            );
        }
        for (index, question) in questions.iter().enumerate() {
            if !question.issues.is_empty() {
                tracing::warn!(
                    question = index + 1,
                    issues = ?question.issues,
                    "Inconsistent graded question in {}",
                    submission.key
                );
            }
        }

        Self {
            viewer,
            cursor: Cursor::new(questions.len()),
            key: submission.key,
            title: submission.title,
            description: submission.description,
            total_points: submission.total_points,
            submitted_at: submission.submitted_at,
            reported_mark: submission.mark,
            questions,
            audit,
        }
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn key(&self) -> &ReviewKey {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn total_points(&self) -> f64 {
        self.total_points
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn reported_mark(&self) -> f64 {
        self.reported_mark
    }

    pub fn recomputed_mark(&self) -> f64 {
        self.questions.iter().map(|q| q.earned).sum()
    }

    pub fn audit(&self) -> MarkAudit {
        self.audit
    }

    pub fn questions(&self) -> &[ReviewedQuestion] {
        &self.questions
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn current(&self) -> Option<&ReviewedQuestion> {
        self.questions.get(self.cursor.index())
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
}

fn audit_mark(reported: f64, recomputed: f64) -> MarkAudit {
    if (reported - recomputed).abs() <= MARK_EPSILON {
        MarkAudit::Consistent { mark: reported }
    } else {
        MarkAudit::Mismatch {
            reported,
            recomputed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(points: f64, choices: &[&str], chosen: Option<&str>, correct: &str) -> GradedQuestion {
        GradedQuestion {
            text: "Which?".to_string(),
            points,
            choices: choices.iter().map(|c| c.to_string()).collect(),
            chosen: chosen.map(str::to_string),
            correct: correct.to_string(),
        }
    }

    #[test]
    fn test_classification_example() {
        assert_eq!(classify("A", Some("B"), "C"), ChoiceMark::Plain);
        assert_eq!(classify("B", Some("B"), "C"), ChoiceMark::ChosenIncorrect);
        assert_eq!(classify("C", Some("B"), "C"), ChoiceMark::MissedCorrect);
        assert_eq!(classify("C", Some("C"), "C"), ChoiceMark::ChosenCorrect);
    }

    #[test]
    fn test_unanswered_question_earns_nothing() {
        let question = graded(4.0, &["A", "B"], None, "A");
        assert_eq!(points_earned(&question), 0.0);
        assert_eq!(classify("A", None, "A"), ChoiceMark::MissedCorrect);
        assert_eq!(classify("B", None, "A"), ChoiceMark::Plain);
    }

    #[test]
    fn test_issues_flagged() {
        let question = ReviewedQuestion::reconstruct(&graded(1.0, &["A", "B"], Some("Z"), "Q"));
        assert_eq!(
            question.issues,
            vec![
                QuestionIssue::CorrectAnswerNotAmongChoices,
                QuestionIssue::ChosenAnswerNotAmongChoices
            ]
        );
    }

    #[test]
    fn test_audit_tolerates_rounding() {
        assert!(audit_mark(2.5, 0.1 + 2.4).is_consistent());
        assert!(!audit_mark(3.0, 2.5).is_consistent());
    }
}
