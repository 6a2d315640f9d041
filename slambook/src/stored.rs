//! Responses in the shape the backend stores them.
//!
//! A stored answer record carries one column per answer shape
//! (`answer_text`, `answer_option`, `bottle_value`, `answer_image`). Which
//! column is meaningful depends on the kind of the question it answers, so
//! records are decoded against the question set.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use slambook_types::{
    AnswerValue, Answers, ChoiceOption, FileFetcher, QuestionId, QuestionKind, QuestionSet,
    SCALE_MAX,
};
use tracing::{debug, warn};

use crate::browser::SubmittedResponse;

/// One answer record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredAnswer {
    #[serde(rename = "questionid")]
    pub question: QuestionId,

    /// Text and date answers.
    #[serde(default)]
    pub answer_text: Option<String>,

    /// Chosen options, in the order they were stored.
    #[serde(default)]
    pub answer_option: Vec<ChoiceOption>,

    /// Numeric-scale answers.
    #[serde(default)]
    pub bottle_value: Option<i64>,

    /// Name of the stored image or signature file.
    #[serde(default)]
    pub answer_image: Option<String>,
}

impl StoredAnswer {
    /// The answer for a question of `kind`.
    ///
    /// Files are fetched through `files`. A failed fetch is logged and gives
    /// an answer without a file, as does a missing or blank file name.
    pub fn to_answer(&self, kind: QuestionKind, files: &mut impl FileFetcher) -> AnswerValue {
        let text = || self.answer_text.clone().unwrap_or_default();
        match kind {
            QuestionKind::SingleChoice => AnswerValue::Choice(
                self.answer_option
                    .first()
                    .map(|option| option.text.clone())
                    .unwrap_or_default(),
            ),
            QuestionKind::MultiChoice => AnswerValue::Choices(
                self.answer_option
                    .iter()
                    .map(|option| option.text.clone())
                    .collect(),
            ),
            QuestionKind::ShortText | QuestionKind::LongText => AnswerValue::Text(text()),
            QuestionKind::Date => AnswerValue::Date(text()),
            QuestionKind::NumericScale => {
                let value = self.bottle_value.unwrap_or(0).clamp(0, i64::from(SCALE_MAX));
                AnswerValue::Scale(value as u8)
            }
            QuestionKind::ImageFile | QuestionKind::SignatureFile => {
                let file = self
                    .answer_image
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .and_then(|name| {
                        files
                            .fetch(name)
                            .inspect_err(|err| {
                                warn!(question = %self.question, name, "could not fetch stored file: {err:#}");
                            })
                            .ok()
                    });
                AnswerValue::File(file)
            }
        }
    }
}

/// One response record with its answers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredResponse {
    #[serde(rename = "responseid")]
    pub id: String,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub answers: Vec<StoredAnswer>,
}

impl StoredResponse {
    /// Decode the answer records against `set`.
    ///
    /// Records for questions the set does not contain, or whose type tag is
    /// unknown, are skipped.
    pub fn decode(self, set: &QuestionSet, files: &mut impl FileFetcher) -> SubmittedResponse {
        let mut answers = Answers::new();
        for record in &self.answers {
            let Some(question) = set.get(&record.question) else {
                debug!(response = %self.id, question = %record.question, "answer to unknown question skipped");
                continue;
            };
            match question.kind() {
                Ok(kind) => answers.insert(record.question.clone(), record.to_answer(kind, files)),
                Err(err) => {
                    debug!(response = %self.id, question = %record.question, "{err}, answer skipped");
                }
            }
        }

        let response = SubmittedResponse::new(self.id, answers);
        match self.created {
            Some(created) => response.created_at(created),
            None => response,
        }
    }
}

/// Decode a list of stored responses, keeping their order.
pub fn decode_responses(
    set: &QuestionSet,
    stored: Vec<StoredResponse>,
    files: &mut impl FileFetcher,
) -> Vec<SubmittedResponse> {
    stored
        .into_iter()
        .map(|response| response.decode(set, files))
        .collect()
}
