mod common;

use common::FakeBackend;
use school_quiz::Error;
use school_quiz::models::{QuizKey, ReviewKey, Viewer};
use school_quiz::protocol::SubmissionResponse;
use school_quiz::session::{ChoiceMark, MarkAudit, QuestionIssue, bootstrap_review};
use serde_json::{Value, json};

fn review_key() -> ReviewKey {
    QuizKey::new("bio-101", "7").for_student("s-42")
}

fn submission(mark: Value, questions: Value) -> SubmissionResponse {
    serde_json::from_value(json!({
        "title": "Cell Biology",
        "description": "Unit 2 check",
        "total_points": 15,
        "mark": mark,
        "submitted_on": "2024-03-01T10:15:00Z",
        "questions": questions
    }))
    .unwrap()
}

fn two_questions(mark: Value) -> SubmissionResponse {
    submission(
        mark,
        json!([
            {
                "question_text": "Powerhouse of the cell?",
                "point": 5,
                "choices": ["Nucleus", "Mitochondria", "Ribosome"],
                "chosen_answer": "Mitochondria",
                "correct_answer": "Mitochondria"
            },
            {
                "question_text": "Site of protein synthesis?",
                "point": "10",
                "choices": ["A", "B", "C"],
                "chosen_answer": "B",
                "correct_answer": "C"
            }
        ]),
    )
}

#[tokio::test]
async fn wrong_answer_marks_chosen_and_correct_choices() {
    let backend = FakeBackend::with_submission(two_questions(json!(5)));
    let review = bootstrap_review(&backend, Viewer::Student, review_key())
        .await
        .unwrap();

    let second = &review.questions()[1];
    let marks: Vec<_> = second.choices.iter().map(|c| c.mark).collect();
    assert_eq!(
        marks,
        vec![
            ChoiceMark::Plain,
            ChoiceMark::ChosenIncorrect,
            ChoiceMark::MissedCorrect
        ]
    );
    assert_eq!(second.earned, 0.0);
    assert!(!second.is_correct());

    let first = &review.questions()[0];
    assert_eq!(first.choices[1].mark, ChoiceMark::ChosenCorrect);
    assert_eq!(first.earned, 5.0);
}

#[tokio::test]
async fn recomputed_mark_matches_reported_mark() {
    let backend = FakeBackend::with_submission(two_questions(json!("5")));
    let review = bootstrap_review(&backend, Viewer::Teacher, review_key())
        .await
        .unwrap();

    assert_eq!(review.recomputed_mark(), 5.0);
    assert_eq!(review.reported_mark(), 5.0);
    assert_eq!(review.audit(), MarkAudit::Consistent { mark: 5.0 });
    assert_eq!(review.total_points(), 15.0);
    assert!(review.submitted_at().is_some());
}

#[tokio::test]
async fn mismatched_mark_surfaces_both_figures() {
    let backend = FakeBackend::with_submission(two_questions(json!(15)));
    let review = bootstrap_review(&backend, Viewer::Parent, review_key())
        .await
        .unwrap();

    assert_eq!(
        review.audit(),
        MarkAudit::Mismatch {
            reported: 15.0,
            recomputed: 5.0
        }
    );
    assert!(!review.audit().is_consistent());
}

#[tokio::test]
async fn unanswered_question_earns_nothing() {
    let backend = FakeBackend::with_submission(submission(
        json!(0),
        json!([
            {
                "text": "Largest organelle?",
                "points": 5,
                "choices": ["Nucleus", "Vacuole"],
                "chosen_answer": null,
                "correct_answer": "Nucleus"
            }
        ]),
    ));
    let review = bootstrap_review(&backend, Viewer::Student, review_key())
        .await
        .unwrap();

    let question = &review.questions()[0];
    assert_eq!(question.chosen, None);
    assert_eq!(question.earned, 0.0);
    assert_eq!(question.choices[0].mark, ChoiceMark::MissedCorrect);
    assert_eq!(question.choices[1].mark, ChoiceMark::Plain);
    assert!(review.audit().is_consistent());
}

#[tokio::test]
async fn inconsistent_question_data_is_flagged() {
    let backend = FakeBackend::with_submission(submission(
        json!(0),
        json!([
            {
                "text": "Pick one",
                "points": 2,
                "choices": ["A", "B"],
                "chosen_answer": "Z",
                "correct_answer": "Y"
            }
        ]),
    ));
    let review = bootstrap_review(&backend, Viewer::Teacher, review_key())
        .await
        .unwrap();

    let question = &review.questions()[0];
    assert_eq!(
        question.issues,
        vec![
            QuestionIssue::CorrectAnswerNotAmongChoices,
            QuestionIssue::ChosenAnswerNotAmongChoices
        ]
    );
    assert!(question.choices.iter().all(|c| c.mark == ChoiceMark::Plain));
}

#[tokio::test]
async fn every_viewer_uses_the_same_reconstruction() {
    let backend = FakeBackend::with_submission(two_questions(json!(5)));

    let mut reviews = Vec::new();
    for viewer in [Viewer::Student, Viewer::Teacher, Viewer::Parent] {
        let review = bootstrap_review(&backend, viewer, review_key())
            .await
            .unwrap();
        assert_eq!(review.viewer(), viewer);
        assert_eq!(review.key(), &review_key());
        reviews.push(review);
    }

    assert_eq!(reviews[0].questions(), reviews[1].questions());
    assert_eq!(reviews[1].questions(), reviews[2].questions());
    assert_eq!(
        *backend.viewers.lock().unwrap(),
        vec![Viewer::Student, Viewer::Teacher, Viewer::Parent]
    );
}

#[tokio::test]
async fn missing_submission_is_no_submission() {
    let missing = FakeBackend::default();
    let err = bootstrap_review(&missing, Viewer::Student, review_key())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::NoSubmission(_)));
    assert!(err.is_empty_state());

    let empty = FakeBackend::with_submission(submission(json!(0), json!([])));
    let err = bootstrap_review(&empty, Viewer::Parent, review_key())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::NoSubmission(_)));

    let unreachable = FakeBackend {
        submission_unreachable: true,
        ..Default::default()
    };
    let err = bootstrap_review(&unreachable, Viewer::Teacher, review_key())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::NoSubmission(_)));
}

#[tokio::test]
async fn review_navigation_stays_in_range() {
    let backend = FakeBackend::with_submission(two_questions(json!(5)));
    let mut review = bootstrap_review(&backend, Viewer::Student, review_key())
        .await
        .unwrap();

    review.prev();
    assert_eq!(review.cursor().index(), 0);
    review.next();
    review.next();
    assert_eq!(review.cursor().index(), 1);
    assert!(!review.jump_to(2));
    assert!(review.jump_to(0));
    assert_eq!(
        review.current().map(|q| q.text.as_str()),
        Some("Powerhouse of the cell?")
    );
}
