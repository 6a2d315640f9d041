use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::QuestionKind;

/// Format of date answers, as produced by a date input (`2024-02-29`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound of the numeric scale. The lower bound is 0.
pub const SCALE_MAX: u8 = 10;

/// A single answer value collected by a question widget.
///
/// The variant must match the question's kind; see [`AnswerValue::fits`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    /// The chosen option's text (single-choice). Empty when nothing is chosen.
    Choice(String),

    /// The chosen options' texts in selection order (multi-choice).
    Choices(Vec<String>),

    /// Free text (short-text and long-text). Empty text is a real answer.
    Text(String),

    /// A `YYYY-MM-DD` date, or empty.
    Date(String),

    /// A point on the 0-10 scale.
    Scale(u8),

    /// An uploaded file (image-file and signature-file), or none.
    File(Option<FileHandle>),
}

impl AnswerValue {
    /// Check if this value has the shape answers of `kind` must have.
    pub fn fits(&self, kind: QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Choice(_), QuestionKind::SingleChoice)
                | (Self::Choices(_), QuestionKind::MultiChoice)
                | (Self::Text(_), QuestionKind::ShortText | QuestionKind::LongText)
                | (Self::Date(_), QuestionKind::Date)
                | (Self::Scale(_), QuestionKind::NumericScale)
                | (
                    Self::File(_),
                    QuestionKind::ImageFile | QuestionKind::SignatureFile
                )
        )
    }

    /// Check if this is an empty sentinel: `""`, no selections, or no file.
    ///
    /// A scale value is never empty; 0 is a legitimate answer.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Choice(s) | Self::Text(s) | Self::Date(s) => s.is_empty(),
            Self::Choices(list) => list.is_empty(),
            Self::Scale(_) => false,
            Self::File(file) => file.is_none(),
        }
    }

    /// Try to get this value as a string (choice, text, or date).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Choice(s) | Self::Text(s) | Self::Date(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the selected options of a multi-choice answer.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Self::Choices(list) => Some(list),
            _ => None,
        }
    }

    /// Try to get this value as a scale point.
    pub fn as_scale(&self) -> Option<u8> {
        match self {
            Self::Scale(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the file of a file answer. `None` also for an empty file answer.
    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(file) => file.as_ref(),
            _ => None,
        }
    }

    /// Parse a date answer. Empty or malformed dates give `None`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(s) => parse_date(s),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Choice(_) => "Choice",
            Self::Choices(_) => "Choices",
            Self::Text(_) => "Text",
            Self::Date(_) => "Date",
            Self::Scale(_) => "Scale",
            Self::File(_) => "File",
        }
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u8> for AnswerValue {
    fn from(v: u8) -> Self {
        Self::Scale(v)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(list: Vec<String>) -> Self {
        Self::Choices(list)
    }
}

impl From<NaiveDate> for AnswerValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date.format(DATE_FORMAT).to_string())
    }
}

impl From<FileHandle> for AnswerValue {
    fn from(file: FileHandle) -> Self {
        Self::File(Some(file))
    }
}

/// A file picked by the user.
///
/// The contents are shared, so cloning a handle (as every answer snapshot does)
/// does not copy the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content_type: Option<String>,
    bytes: Arc<[u8]>,
}

impl FileHandle {
    /// Create a handle from a file name and its contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the MIME type reported by the picker.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The MIME type, falling back to a guess from the file extension.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type
            .as_deref()
            .or_else(|| guess_content_type(&self.name))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn guess_content_type(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
