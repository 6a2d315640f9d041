//! Core types for the slambook crate.
//!
//! This crate provides the foundational types for question sets:
//! - `QuestionSet` - The ordered collection of questions behind one share link
//! - `Question` and `QuestionKind` - Individual questions and their type tags
//! - `AnswerValue` and `Answers` - Collected data keyed by question id
//! - `QuestionDraft` and `OptionDiff` - Authoring bookkeeping
//! - `FormBackend`, `FileUploader` and `FileFetcher` traits - For presenting forms and storing files

mod question_id;
pub use question_id::{OptionId, QuestionId};

mod answer_value;
pub use answer_value::{AnswerValue, DATE_FORMAT, FileHandle, SCALE_MAX, parse_date};

mod answers;
pub use answers::{AnswerError, Answers};

mod question;
pub use question::{ChoiceOption, Question, QuestionKind, selection_cap};

mod question_set;
pub use question_set::QuestionSet;

mod authoring;
pub use authoring::{DraftError, OptionDiff, QuestionDraft};

mod error;
pub use error::{RequiredError, UnsupportedQuestionType};

mod traits;
pub use traits::{FileFetcher, FileUploader, FormBackend};
