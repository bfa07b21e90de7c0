//! Wire messages exchanged with the school backend.
//!
//! All bodies are JSON. Ids may arrive as strings or integers and point
//! values as numbers or numeric strings; both are normalized here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::models::{GradedQuestion, Question, Quiz, QuizOption, ReviewKey, Submission};

/// Quiz definition served for taking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    #[serde(default, alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    /// Minutes.
    #[serde(alias = "duration_minutes", deserialize_with = "deserialize_number")]
    pub duration: f64,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub total_points: f64,
    #[serde(default)]
    pub questions: Vec<QuestionMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionMessage {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "question_text")]
    pub text: String,
    #[serde(default, alias = "point", deserialize_with = "deserialize_number")]
    pub points: f64,
    #[serde(default)]
    pub options: Vec<OptionMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionMessage {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "option_text")]
    pub text: String,
}

/// One answered question in a submit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub chosen_option_id: String,
    pub chosen_option_text: String,
    pub question_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerRecord>,
}

/// Graded submission served for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub total_points: f64,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub mark: f64,
    #[serde(default, alias = "submitted_on")]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub questions: Vec<GradedQuestionMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedQuestionMessage {
    #[serde(alias = "question_text")]
    pub text: String,
    #[serde(default, alias = "point", deserialize_with = "deserialize_number")]
    pub points: f64,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub chosen_answer: Option<String>,
    #[serde(default)]
    pub correct_answer: String,
}

impl TryFrom<QuizResponse> for Quiz {
    type Error = Error;

    fn try_from(msg: QuizResponse) -> Result<Self> {
        let duration_minutes = whole_minutes(msg.duration)?;

        Ok(Quiz {
            start_date: msg.start_date.as_deref().and_then(parse_date),
            start_time: msg.start_time.as_deref().and_then(parse_time),
            id: msg.id,
            title: msg.title,
            description: msg.description,
            duration_minutes,
            total_points: msg.total_points,
            questions: msg
                .questions
                .into_iter()
                .map(|q| Question {
                    id: q.id,
                    text: q.text,
                    points: q.points,
                    options: q
                        .options
                        .into_iter()
                        .map(|o| QuizOption { id: o.id, text: o.text })
                        .collect(),
                })
                .collect(),
        })
    }
}

impl SubmissionResponse {
    pub fn into_submission(self, key: ReviewKey) -> Submission {
        Submission {
            key,
            title: self.title,
            description: self.description,
            total_points: self.total_points,
            mark: self.mark,
            submitted_at: self.submitted_at.as_deref().and_then(parse_timestamp),
            questions: self
                .questions
                .into_iter()
                .map(|q| GradedQuestion {
                    text: q.text,
                    points: q.points,
                    choices: q.choices,
                    chosen: q.chosen_answer.filter(|c| !c.is_empty()),
                    correct: q.correct_answer,
                })
                .collect(),
        }
    }
}

fn whole_minutes(duration: f64) -> Result<u32> {
    if !duration.is_finite() || duration < 1.0 || duration.fract() != 0.0 || duration > u32::MAX as f64
    {
        return Err(Error::InvalidQuiz(format!(
            "duration must be a positive whole number of minutes, got {}",
            duration
        )));
    }
    Ok(duration as u32)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()));
    if parsed.is_none() {
        tracing::warn!("Ignoring unparsable quiz start date: {:?}", raw);
    }
    parsed
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok();
    if parsed.is_none() {
        tracing::warn!("Ignoring unparsable quiz start time: {:?}", raw);
    }
    parsed
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => Ok(s),
        StringOrInt::Int(i) => Ok(i.to_string()),
    }
}

fn deserialize_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid number string: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_accepts_mixed_id_and_number_shapes() {
        let json = r#"{
            "id": 42,
            "title": "Fractions",
            "duration": "10",
            "total_points": 15,
            "start_date": "2024-03-01",
            "start_time": "09:30",
            "questions": [
                {"id": 1, "text": "1/2 + 1/4?", "points": "5",
                 "options": [{"id": 10, "text": "3/4"}, {"id": "11", "text": "2/6"}]}
            ]
        }"#;

        let msg: QuizResponse = serde_json::from_str(json).unwrap();
        let quiz = Quiz::try_from(msg).unwrap();

        assert_eq!(quiz.id, "42");
        assert_eq!(quiz.duration_minutes, 10);
        assert_eq!(quiz.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(quiz.start_time, NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(quiz.questions[0].id, "1");
        assert_eq!(quiz.questions[0].points, 5.0);
        assert_eq!(quiz.questions[0].options[1].id, "11");
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        let json = r#"{"duration": 0, "questions": []}"#;
        let msg: QuizResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(Quiz::try_from(msg), Err(Error::InvalidQuiz(_))));
    }

    #[test]
    fn test_answer_record_serialization() {
        let request = SubmitRequest {
            answers: vec![AnswerRecord {
                question_id: "q1".to_string(),
                chosen_option_id: "o2".to_string(),
                chosen_option_text: "Paris".to_string(),
                question_text: "Capital of France?".to_string(),
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"chosen_option_id\":\"o2\""));
        assert!(json.contains("\"question_text\":\"Capital of France?\""));
    }

    #[test]
    fn test_submission_blank_choice_is_unanswered() {
        let json = r#"{
            "title": "Fractions",
            "mark": "5",
            "submitted_at": "2024-03-01T10:00:00Z",
            "questions": [
                {"text": "q", "points": 5, "choices": ["A", "B"], "chosen_answer": "", "correct_answer": "A"}
            ]
        }"#;
        let msg: SubmissionResponse = serde_json::from_str(json).unwrap();
        let key = ReviewKey {
            course_id: "c".to_string(),
            quiz_id: "q".to_string(),
            student_id: "s".to_string(),
        };
        let submission = msg.into_submission(key);

        assert_eq!(submission.mark, 5.0);
        assert!(submission.submitted_at.is_some());
        assert_eq!(submission.questions[0].chosen, None);
    }
}
