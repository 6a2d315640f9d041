//! Local bookkeeping for the question authoring page.
//!
//! The backend stores questions and their options separately, so editing a
//! choice question means computing which options to delete and which to add.

use crate::{ChoiceOption, Question, QuestionId, QuestionKind, UnsupportedQuestionType};

/// Error type for question drafts that cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Question text must not be empty")]
    EmptyText,

    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedQuestionType),

    #[error("A {0} question needs at least one non-empty option")]
    NoOptions(&'static str),
}

/// A question being written or edited, before it is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub text: String,
    pub type_tag: String,
    pub required: bool,
    /// Option texts as typed, blanks included.
    pub options: Vec<String>,
    pub max_selection: u32,
}

impl Default for QuestionDraft {
    /// A blank short-text draft with two empty option slots, ready to switch
    /// to a choice kind.
    fn default() -> Self {
        Self {
            text: String::new(),
            type_tag: QuestionKind::ShortText.tag().to_string(),
            required: false,
            options: vec![String::new(), String::new()],
            max_selection: 0,
        }
    }
}

impl QuestionDraft {
    /// Start a draft of the given kind.
    pub fn new(text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            text: text.into(),
            type_tag: kind.tag().to_string(),
            ..Self::default()
        }
    }

    /// Start editing an existing question.
    pub fn from_question(question: &Question) -> Self {
        let options = if question.options().is_empty() {
            vec![String::new(), String::new()]
        } else {
            question.option_texts()
        };
        Self {
            text: question.text().to_string(),
            type_tag: question.type_tag().to_string(),
            required: question.is_required(),
            options,
            max_selection: question.max_selection().unwrap_or(0),
        }
    }

    /// Option texts that are not blank, in order.
    pub fn filled_options(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|o| !o.trim().is_empty())
    }

    /// Check that the draft can be saved, and resolve its kind.
    pub fn validate(&self) -> Result<QuestionKind, DraftError> {
        if self.text.trim().is_empty() {
            return Err(DraftError::EmptyText);
        }
        let kind = QuestionKind::from_tag(&self.type_tag)?;
        if kind.is_choice() && self.filled_options().next().is_none() {
            return Err(DraftError::NoOptions(kind.label()));
        }
        Ok(kind)
    }

    /// The `max_selection` to store for this draft.
    ///
    /// Single-choice is always 1. Multi-choice is capped at the number of
    /// filled options. Other kinds keep whatever the draft says, which is
    /// ignored downstream.
    pub fn normalized_max_selection(&self) -> u32 {
        match QuestionKind::from_tag(&self.type_tag) {
            Ok(QuestionKind::SingleChoice) => 1,
            Ok(QuestionKind::MultiChoice) => self.filled_options().count() as u32,
            _ => self.max_selection,
        }
    }

    /// Build the question to save. Blank options are dropped.
    pub fn to_question(
        &self,
        id: impl Into<QuestionId>,
        sequence: u32,
    ) -> Result<Question, DraftError> {
        let kind = self.validate()?;
        let mut question = Question::new(id, self.text.trim(), kind)
            .with_max_selection(self.normalized_max_selection())
            .with_sequence(sequence);
        if kind.is_choice() {
            question = question.with_options(self.filled_options());
        }
        if self.required {
            question = question.required();
        }
        Ok(question)
    }
}

/// Changes to apply to a saved question's options after an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDiff {
    /// Saved options whose text no longer appears in the edit.
    pub delete: Vec<ChoiceOption>,
    /// Edited texts that are not saved yet.
    pub add: Vec<String>,
}

impl OptionDiff {
    /// Compare the saved options with the edited texts.
    ///
    /// Blank edited texts are ignored. Texts are compared exactly, so renaming
    /// an option shows up as one delete plus one add.
    pub fn between(existing: &[ChoiceOption], edited: &[String]) -> Self {
        let kept: Vec<&str> = edited
            .iter()
            .map(String::as_str)
            .filter(|o| !o.trim().is_empty())
            .collect();

        let delete = existing
            .iter()
            .filter(|option| !kept.contains(&option.text.as_str()))
            .cloned()
            .collect();

        let add = kept
            .iter()
            .filter(|text| !existing.iter().any(|option| option.text == **text))
            .map(|text| text.to_string())
            .collect();

        Self { delete, add }
    }

    /// Check if nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.add.is_empty()
    }
}
