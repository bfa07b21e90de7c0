mod messages;

pub use messages::{
    AnswerRecord, GradedQuestionMessage, OptionMessage, QuestionMessage, QuizResponse,
    SubmissionResponse, SubmitRequest,
};
