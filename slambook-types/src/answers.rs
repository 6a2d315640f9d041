use std::collections::HashMap;

use crate::{AnswerValue, FileHandle, Question, QuestionId, QuestionSet, RequiredError};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for question: {0}")]
    Missing(QuestionId),

    #[error("Type mismatch for question '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers collected by a form, keyed by question id.
///
/// An entry holding an empty sentinel (`""`, no selections) is different from
/// a missing entry: the first was committed by the user, the second never was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: HashMap<QuestionId, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer map.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer for the given question.
    pub fn insert(&mut self, id: impl Into<QuestionId>, value: impl Into<AnswerValue>) {
        self.values.insert(id.into(), value.into());
    }

    /// Get the answer for the given question.
    pub fn get(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    /// Check if an answer exists for the given question.
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.values.contains_key(id)
    }

    /// Remove the answer for the given question.
    pub fn remove(&mut self, id: &QuestionId) -> Option<AnswerValue> {
        self.values.remove(id)
    }

    /// Remove all answers.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another answer map into this one.
    pub fn extend(&mut self, other: Answers) {
        self.values.extend(other.values);
    }

    // === Convenience accessors ===

    /// Get a text answer (short-text or long-text).
    pub fn get_text(&self, id: &QuestionId) -> Result<&str, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Text(s)) => Ok(s),
            Some(other) => Err(mismatch(id, "Text", other)),
            None => Err(AnswerError::Missing(id.clone())),
        }
    }

    /// Get a single-choice answer.
    pub fn get_choice(&self, id: &QuestionId) -> Result<&str, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Choice(s)) => Ok(s),
            Some(other) => Err(mismatch(id, "Choice", other)),
            None => Err(AnswerError::Missing(id.clone())),
        }
    }

    /// Get a multi-choice answer.
    pub fn get_choices(&self, id: &QuestionId) -> Result<&[String], AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Choices(list)) => Ok(list),
            Some(other) => Err(mismatch(id, "Choices", other)),
            None => Err(AnswerError::Missing(id.clone())),
        }
    }

    /// Get a date answer as the raw string.
    pub fn get_date(&self, id: &QuestionId) -> Result<&str, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Date(s)) => Ok(s),
            Some(other) => Err(mismatch(id, "Date", other)),
            None => Err(AnswerError::Missing(id.clone())),
        }
    }

    /// Get a numeric-scale answer.
    pub fn get_scale(&self, id: &QuestionId) -> Result<u8, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Scale(v)) => Ok(*v),
            Some(other) => Err(mismatch(id, "Scale", other)),
            None => Err(AnswerError::Missing(id.clone())),
        }
    }

    /// Get a file answer. `Ok(None)` means the question was answered with no file.
    pub fn get_file(&self, id: &QuestionId) -> Result<Option<&FileHandle>, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::File(file)) => Ok(file.as_ref()),
            Some(other) => Err(mismatch(id, "File", other)),
            None => Err(AnswerError::Missing(id.clone())),
        }
    }

    /// Check if the question has a usable answer.
    ///
    /// Missing entries and empty sentinels count as unanswered.
    pub fn has_value(&self, id: &QuestionId) -> bool {
        self.get(id).is_some_and(|value| !value.is_empty())
    }

    /// All required questions of `set` without a usable answer, in display order.
    pub fn unanswered_required<'a>(&self, set: &'a QuestionSet) -> Vec<&'a Question> {
        set.questions()
            .iter()
            .filter(|q| q.is_required() && !self.has_value(q.id()))
            .collect()
    }

    /// Fail with the first required question of `set` that has no usable answer.
    pub fn check_required(&self, set: &QuestionSet) -> Result<(), RequiredError> {
        match self.unanswered_required(set).first() {
            Some(question) => Err(RequiredError::Unanswered {
                id: question.id().clone(),
                text: question.text().to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn mismatch(id: &QuestionId, expected: &'static str, actual: &AnswerValue) -> AnswerError {
    AnswerError::TypeMismatch {
        id: id.clone(),
        expected,
        actual: actual.type_name(),
    }
}

impl IntoIterator for Answers {
    type Item = (QuestionId, AnswerValue);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a QuestionId, &'a AnswerValue);
    type IntoIter = std::collections::hash_map::Iter<'a, QuestionId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for Answers {
    fn from_iter<T: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
