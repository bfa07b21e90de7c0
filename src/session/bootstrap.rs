//! Fetch the data a session needs and build it.
//!
//! Every failure collapses into one of two states the screens can show:
//! `Error::NoQuizData` for Take Mode and `Error::NoSubmission` for Review
//! Mode. The underlying cause is logged, not shown.

use crate::api::QuizBackend;
use crate::error::{Error, Result};
use crate::models::{Quiz, QuizKey, ReviewKey, Viewer};

use super::review::Review;
use super::take::TakeSession;

pub async fn bootstrap_take(backend: &dyn QuizBackend, key: QuizKey) -> Result<TakeSession> {
    let response = match backend.fetch_quiz(&key).await {
        Ok(Some(response)) => response,
        Ok(None) => {
            tracing::info!("No quiz returned for {}", key);
            return Err(Error::NoQuizData(format!("{} not found", key)));
        }
        Err(err) => {
            tracing::error!("Fetching {} failed: {}", key, err);
            return Err(Error::NoQuizData(format!("fetching {} failed", key)));
        }
    };

    let quiz = Quiz::try_from(response).map_err(|err| {
        tracing::error!("Quiz {} is unusable: {}", key, err);
        Error::NoQuizData(format!("{} is unusable", key))
    })?;

    TakeSession::new(key, quiz).map_err(|err| {
        tracing::error!("Quiz is unusable: {}", err);
        if matches!(err, Error::NoQuizData(_)) {
            err
        } else {
            Error::NoQuizData(err.to_string())
        }
    })
}

/// One entry point for the student, teacher and parent review screens.
pub async fn bootstrap_review(
    backend: &dyn QuizBackend,
    viewer: Viewer,
    key: ReviewKey,
) -> Result<Review> {
    let response = match backend.fetch_submission(viewer, &key).await {
        Ok(Some(response)) => response,
        Ok(None) => {
            tracing::info!(%viewer, "No submission for {}", key);
            return Err(Error::NoSubmission(format!("{} not found", key)));
        }
        Err(err) => {
            tracing::error!(%viewer, "Fetching submission {} failed: {}", key, err);
            return Err(Error::NoSubmission(format!("fetching {} failed", key)));
        }
    };

    if response.questions.is_empty() {
        tracing::info!(%viewer, "Submission {} has no questions", key);
        return Err(Error::NoSubmission(format!("{} has no questions", key)));
    }

    tracing::info!(%viewer, "Loaded submission for {}", key);
    Ok(Review::new(viewer, response.into_submission(key)))
}
