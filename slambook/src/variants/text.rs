use slambook_types::{AnswerValue, QuestionKind, parse_date};

use crate::contract::QuestionWidget;

/// Replace the control's content with this text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit(pub String);

/// Single-line text input.
#[derive(Debug, Clone, Default)]
pub struct ShortText;

/// Multi-line text area.
#[derive(Debug, Clone, Default)]
pub struct LongText;

/// Date input. Accepts an empty value or a valid `YYYY-MM-DD` date.
#[derive(Debug, Clone, Default)]
pub struct DateInput;

fn text_from_answer(answer: AnswerValue) -> Result<String, AnswerValue> {
    match answer {
        AnswerValue::Text(text) => Ok(text),
        other => Err(other),
    }
}

impl QuestionWidget for ShortText {
    type Value = String;
    type Event = Edit;

    const KIND: QuestionKind = QuestionKind::ShortText;

    fn empty() -> String {
        String::new()
    }

    fn apply(&self, _staged: &String, Edit(text): Edit) -> Option<String> {
        Some(text)
    }

    fn into_answer(value: String) -> AnswerValue {
        AnswerValue::Text(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<String, AnswerValue> {
        text_from_answer(answer)
    }
}

impl QuestionWidget for LongText {
    type Value = String;
    type Event = Edit;

    const KIND: QuestionKind = QuestionKind::LongText;

    fn empty() -> String {
        String::new()
    }

    fn apply(&self, _staged: &String, Edit(text): Edit) -> Option<String> {
        Some(text)
    }

    fn into_answer(value: String) -> AnswerValue {
        AnswerValue::Text(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<String, AnswerValue> {
        text_from_answer(answer)
    }
}

impl QuestionWidget for DateInput {
    type Value = String;
    type Event = Edit;

    const KIND: QuestionKind = QuestionKind::Date;

    fn empty() -> String {
        String::new()
    }

    fn apply(&self, _staged: &String, Edit(raw): Edit) -> Option<String> {
        (raw.is_empty() || parse_date(&raw).is_some()).then_some(raw)
    }

    fn into_answer(value: String) -> AnswerValue {
        AnswerValue::Date(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<String, AnswerValue> {
        match answer {
            AnswerValue::Date(date) => Ok(date),
            other => Err(other),
        }
    }
}
