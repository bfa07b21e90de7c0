use std::collections::HashMap;

/// Question id to the text of the option the student picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: HashMap<String, String>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the selection for a question.
    pub fn select(&mut self, question_id: impl Into<String>, option_text: impl Into<String>) {
        self.entries.insert(question_id.into(), option_text.into());
    }

    /// Return a question to the unanswered state.
    pub fn clear(&mut self, question_id: &str) -> Option<String> {
        self.entries.remove(question_id)
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries.get(question_id).map(String::as_str)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.entries.contains_key(question_id)
    }

    /// Number of answered questions.
    pub fn progress_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(q, o)| (q.as_str(), o.as_str()))
    }
}
