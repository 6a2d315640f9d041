use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, OptionId, QuestionId, UnsupportedQuestionType};

/// The kind of question, determining the input widget and the answer shape.
///
/// This is the closed set of type tags understood by the form. Descriptors keep
/// the raw wire tag and resolve it with [`QuestionKind::from_tag`], so an unknown
/// tag surfaces as an error instead of being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    /// Pick exactly one option (radio group).
    SingleChoice,

    /// Pick any number of options, up to a cap (checkboxes).
    MultiChoice,

    /// Single-line text input.
    ShortText,

    /// Multi-line text area.
    LongText,

    /// Upload an image file.
    ImageFile,

    /// Calendar date.
    Date,

    /// Slider from 0 to 10.
    NumericScale,

    /// Upload an image of a signature, shown with a local preview.
    SignatureFile,
}

impl QuestionKind {
    /// All kinds, in the order the authoring page lists them.
    pub const ALL: [QuestionKind; 8] = [
        Self::SingleChoice,
        Self::MultiChoice,
        Self::ShortText,
        Self::LongText,
        Self::ImageFile,
        Self::Date,
        Self::NumericScale,
        Self::SignatureFile,
    ];

    /// The wire tag used by the backend API.
    pub fn tag(self) -> &'static str {
        match self {
            Self::SingleChoice => "MCQ",
            Self::MultiChoice => "MSQ",
            Self::ShortText => "Text_One",
            Self::LongText => "Text_multi",
            Self::ImageFile => "IMAGE",
            Self::Date => "DATE",
            Self::NumericScale => "Bottle",
            Self::SignatureFile => "Sign",
        }
    }

    /// Resolve a wire tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Result<Self, UnsupportedQuestionType> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| UnsupportedQuestionType(tag.to_string()))
    }

    /// Human readable name, e.g. for a type picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::SingleChoice => "Multiple Choice",
            Self::MultiChoice => "Multiple Select",
            Self::ShortText => "Short Answer",
            Self::LongText => "Paragraph",
            Self::ImageFile => "Image Upload",
            Self::Date => "Date",
            Self::NumericScale => "Scale (0-10)",
            Self::SignatureFile => "Signature",
        }
    }

    /// Check if this kind carries a list of options.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }

    /// Check if answers of this kind are files.
    pub fn is_file(self) -> bool {
        matches!(self, Self::ImageFile | Self::SignatureFile)
    }

    /// The answer a freshly rendered form starts with.
    pub fn empty_answer(self) -> AnswerValue {
        match self {
            Self::SingleChoice => AnswerValue::Choice(String::new()),
            Self::MultiChoice => AnswerValue::Choices(Vec::new()),
            Self::ShortText | Self::LongText => AnswerValue::Text(String::new()),
            Self::Date => AnswerValue::Date(String::new()),
            Self::NumericScale => AnswerValue::Scale(0),
            Self::ImageFile | Self::SignatureFile => AnswerValue::File(None),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for QuestionKind {
    type Err = UnsupportedQuestionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// One option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct ChoiceOption {
    /// Backend id, absent until the option has been saved.
    #[serde(rename = "optionid", skip_serializing_if = "Option::is_none")]
    pub id: Option<OptionId>,

    /// The text shown next to the radio button or checkbox.
    #[serde(rename = "optiontext")]
    pub text: String,
}

impl ChoiceOption {
    /// An option that has not been saved yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    /// An option with a backend id.
    pub fn with_id(id: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
        }
    }
}

/// Options arrive either as bare strings (authoring payloads) or as
/// `{optionid, optiontext}` objects (question fetches).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Text(String),
    Saved {
        #[serde(rename = "optionid", default)]
        id: Option<OptionId>,
        #[serde(rename = "optiontext")]
        text: String,
    },
}

impl From<RawOption> for ChoiceOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Text(text) => Self::new(text),
            RawOption::Saved { id, text } => Self { id, text },
        }
    }
}

/// A single question in a question set.
///
/// Field names follow the backend's JSON so descriptors can be deserialized
/// straight from API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The key of this question's answer in `Answers`.
    #[serde(rename = "questionid")]
    id: QuestionId,

    /// The prompt text shown to the user.
    #[serde(rename = "questiontext")]
    text: String,

    /// Raw type tag, resolved through [`QuestionKind::from_tag`].
    #[serde(rename = "type")]
    type_tag: String,

    /// Whether an answer is needed to submit. Only a marker for the widget.
    #[serde(rename = "is_required", default)]
    required: bool,

    /// Options for choice questions, in display order.
    #[serde(default)]
    options: Vec<ChoiceOption>,

    /// Cap on simultaneous selections for multi-choice questions.
    #[serde(default)]
    max_selection: Option<u32>,

    /// Display position within the question set.
    #[serde(default)]
    sequence: u32,
}

impl Question {
    /// Create a new question of a known kind.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self::with_tag(id, text, kind.tag())
    }

    /// Create a question from a raw type tag, which may be unknown.
    pub fn with_tag(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            type_tag: type_tag.into(),
            required: false,
            options: Vec::new(),
            max_selection: None,
            sequence: 0,
        }
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set unsaved options from their texts.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(ChoiceOption::new).collect();
        self
    }

    /// Set options that already carry backend ids.
    pub fn with_choice_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    /// Set the multi-choice selection cap.
    pub fn with_max_selection(mut self, max: u32) -> Self {
        self.max_selection = Some(max);
        self
    }

    /// Set the display position.
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The raw type tag as received.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Resolve the type tag.
    pub fn kind(&self) -> Result<QuestionKind, UnsupportedQuestionType> {
        QuestionKind::from_tag(&self.type_tag)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// The option texts, in display order.
    pub fn option_texts(&self) -> Vec<String> {
        self.options.iter().map(|o| o.text.clone()).collect()
    }

    pub fn max_selection(&self) -> Option<u32> {
        self.max_selection
    }

    /// How many options a multi-choice answer may hold.
    ///
    /// An unset or zero `max_selection` falls back to the number of options.
    pub fn selection_cap(&self) -> usize {
        selection_cap(self.max_selection, self.options.len())
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub(crate) fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
    }
}

/// Selection cap for a multi-choice question with `option_count` options.
pub fn selection_cap(max_selection: Option<u32>, option_count: usize) -> usize {
    match max_selection {
        Some(max) if max > 0 => max as usize,
        _ => option_count,
    }
}
