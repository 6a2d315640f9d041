//! Turning collected answers into the payload the backend stores.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use slambook_types::{
    AnswerValue, Answers, FileUploader, Question, QuestionId, QuestionSet, RequiredError,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Required(#[from] RequiredError),

    #[error("Failed to upload file for question {id}")]
    Upload {
        id: QuestionId,
        #[source]
        source: anyhow::Error,
    },
}

/// The submit payload: `{"answers": {<questionid>: <value>}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submission {
    answers: BTreeMap<QuestionId, Value>,
}

impl Submission {
    pub fn answers(&self) -> &BTreeMap<QuestionId, Value> {
        &self.answers
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Value> {
        self.answers.get(id)
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({ "answers": self.answers })
    }
}

/// Check required answers, upload files and map choices to option ids.
///
/// Only questions present in `answers` are included. Files are uploaded in
/// display order; the first failed upload aborts the submission.
pub fn prepare_submission(
    set: &QuestionSet,
    answers: &Answers,
    uploader: &mut impl FileUploader,
) -> Result<Submission, SubmitError> {
    answers.check_required(set)?;

    let mut submission = Submission::default();
    for question in set.questions() {
        let Some(answer) = answers.get(question.id()) else {
            continue;
        };
        let value = match answer {
            AnswerValue::Choice(text) => option_ids(question, std::slice::from_ref(text)),
            AnswerValue::Choices(texts) => option_ids(question, texts),
            AnswerValue::Text(text) | AnswerValue::Date(text) => Value::String(text.clone()),
            AnswerValue::Scale(value) => Value::from(*value),
            AnswerValue::File(None) => Value::Null,
            AnswerValue::File(Some(file)) => {
                let url = uploader.upload(file).map_err(|source| SubmitError::Upload {
                    id: question.id().clone(),
                    source,
                })?;
                debug!(question = %question.id(), file = file.name(), %url, "uploaded answer file");
                Value::String(url)
            }
        };
        submission.answers.insert(question.id().clone(), value);
    }
    debug!(answers = submission.answers.len(), "submission prepared");
    Ok(submission)
}

/// Ids of the options whose text is selected, in option order.
fn option_ids(question: &Question, selected: &[String]) -> Value {
    question
        .options()
        .iter()
        .filter(|option| selected.contains(&option.text))
        .filter_map(|option| {
            if option.id.is_none() {
                debug!(question = %question.id(), option = %option.text, "selected option has no id");
            }
            option.id.as_ref().map(|id| Value::String(id.as_str().to_string()))
        })
        .collect()
}
