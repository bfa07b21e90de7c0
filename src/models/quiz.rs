use chrono::{NaiveDate, NaiveTime};

/// A quiz as fetched for taking. Read-only for the life of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: u32,
    /// Display figure from the backend; not checked against question points.
    pub total_points: f64,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub points: f64,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

impl Quiz {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl Question {
    /// Options are matched by text, the key the answer map stores.
    pub fn option_by_text(&self, text: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.text == text)
    }
}
