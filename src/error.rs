//! Crate-wide error type.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The quiz could not be loaded for taking.
    #[error("No quiz data: {0}")]
    NoQuizData(String),

    /// No graded submission exists (or could be loaded) for the student.
    #[error("No submission found: {0}")]
    NoSubmission(String),

    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),
}

impl Error {
    /// Short message that is safe to put in front of the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::NoQuizData(_) | Error::InvalidQuiz(_) => "No quiz data found.",
            Error::NoSubmission(_) => "No submission found for this student.",
            Error::Config(_) => "The client is not configured correctly.",
            Error::Http(_) | Error::Status { .. } => "Could not reach the school server.",
            Error::Json(_) => "The school server sent an unexpected response.",
            Error::Io(_) => "A local I/O error occurred.",
        }
    }

    /// Whether this error is one of the "nothing to show" bootstrap states.
    pub fn is_empty_state(&self) -> bool {
        matches!(
            self,
            Error::NoQuizData(_) | Error::NoSubmission(_) | Error::InvalidQuiz(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_states_are_distinguishable() {
        let quiz = Error::NoQuizData("quiz 7 has no questions".to_string());
        let submission = Error::NoSubmission("404".to_string());

        assert!(quiz.is_empty_state());
        assert!(submission.is_empty_state());
        assert_ne!(quiz.user_message(), submission.user_message());
        assert!(!Error::Config("x".to_string()).is_empty_state());
    }

    #[test]
    fn user_message_hides_details() {
        let err = Error::NoQuizData("backend said: stack trace at line 42".to_string());
        assert!(!err.user_message().contains("stack"));
    }
}
