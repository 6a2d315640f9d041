use crate::QuestionId;

/// A type tag that is not in the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported question type: {0:?}")]
pub struct UnsupportedQuestionType(pub String);

/// A required question has no usable answer at submission time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequiredError {
    #[error("Please answer required question: \"{text}\"")]
    Unanswered { id: QuestionId, text: String },
}
