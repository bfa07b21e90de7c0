mod quiz;
mod submission;

use std::fmt;

pub use quiz::{Question, Quiz, QuizOption};
pub use submission::{GradedQuestion, Submission};

/// Identifies a quiz within a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuizKey {
    pub course_id: String,
    pub quiz_id: String,
}

impl QuizKey {
    pub fn new(course_id: impl Into<String>, quiz_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            quiz_id: quiz_id.into(),
        }
    }

    pub fn for_student(&self, student_id: impl Into<String>) -> ReviewKey {
        ReviewKey {
            course_id: self.course_id.clone(),
            quiz_id: self.quiz_id.clone(),
            student_id: student_id.into(),
        }
    }
}

impl fmt::Display for QuizKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "course {} / quiz {}", self.course_id, self.quiz_id)
    }
}

/// Identifies one student's submission of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewKey {
    pub course_id: String,
    pub quiz_id: String,
    pub student_id: String,
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "course {} / quiz {} / student {}",
            self.course_id, self.quiz_id, self.student_id
        )
    }
}

/// Who is looking at a graded submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Viewer {
    /// A student looking at their own graded quiz.
    Student,
    Teacher,
    /// A parent looking at their child's graded quiz.
    Parent,
}

impl Viewer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Viewer::Student => "student",
            Viewer::Teacher => "teacher",
            Viewer::Parent => "parent",
        }
    }
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
