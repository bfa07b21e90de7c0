use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{QuizKey, ReviewKey, Viewer};
use crate::protocol::{AnswerRecord, QuizResponse, SubmissionResponse, SubmitRequest};

use super::QuizBackend;

/// reqwest-backed client for the school REST API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            Error::Config(format!("Invalid API URL {}: {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API URL cannot be used as a base: {}",
                config.api_base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            token: config.api_token.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        tracing::debug!("GET {}", url);
        let response = self.authorize(self.client.get(url.clone())).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::info!("Backend has no data at {}", url);
            return Ok(None);
        }
        let response = ensure_success(response, &url)?;

        let body = response.text().await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            tracing::info!("Backend returned an empty body for {}", url);
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(trimmed)?))
    }
}

fn ensure_success(response: Response, url: &Url) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!("Backend returned {} for {}", status, url);
        Err(Error::Status {
            status,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl QuizBackend for HttpBackend {
    async fn fetch_quiz(&self, key: &QuizKey) -> Result<Option<QuizResponse>> {
        let url = self.endpoint(&["courses", &key.course_id, "quizzes", &key.quiz_id]);
        self.get_optional(url).await
    }

    async fn submit_quiz(&self, key: &QuizKey, answers: &[AnswerRecord]) -> Result<()> {
        let url = self.endpoint(&[
            "courses",
            &key.course_id,
            "quizzes",
            &key.quiz_id,
            "submit",
        ]);
        let body = SubmitRequest {
            answers: answers.to_vec(),
        };

        tracing::debug!("POST {} ({} answers)", url, body.answers.len());
        let response = self
            .authorize(self.client.post(url.clone()))
            .json(&body)
            .send()
            .await?;
        ensure_success(response, &url)?;
        Ok(())
    }

    async fn fetch_submission(
        &self,
        viewer: Viewer,
        key: &ReviewKey,
    ) -> Result<Option<SubmissionResponse>> {
        let mut url = self.endpoint(&[
            "courses",
            &key.course_id,
            "quizzes",
            &key.quiz_id,
            "submissions",
            &key.student_id,
        ]);
        url.query_pairs_mut().append_pair("viewer", viewer.as_str());
        self.get_optional(url).await
    }
}
