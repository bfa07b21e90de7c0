use async_trait::async_trait;

use crate::error::Result;
use crate::models::{QuizKey, ReviewKey, Viewer};
use crate::protocol::{AnswerRecord, QuizResponse, SubmissionResponse};

/// The three backend calls the quiz engine depends on.
///
/// Fetches return `Ok(None)` when the backend has nothing for the key;
/// transport and decoding failures are `Err`.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn fetch_quiz(&self, key: &QuizKey) -> Result<Option<QuizResponse>>;

    async fn submit_quiz(&self, key: &QuizKey, answers: &[AnswerRecord]) -> Result<()>;

    async fn fetch_submission(
        &self,
        viewer: Viewer,
        key: &ReviewKey,
    ) -> Result<Option<SubmissionResponse>>;
}
