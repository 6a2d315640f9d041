use slambook_types::{AnswerValue, QuestionKind, selection_cap};

use crate::contract::QuestionWidget;

/// Pick the option with this text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select(pub String);

/// Check the option with this text if unchecked, uncheck it otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle(pub String);

/// Radio group: exactly one option, or none yet.
#[derive(Debug, Clone)]
pub struct SingleChoice {
    options: Vec<String>,
}

impl SingleChoice {
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl QuestionWidget for SingleChoice {
    type Value = String;
    type Event = Select;

    const KIND: QuestionKind = QuestionKind::SingleChoice;

    fn empty() -> String {
        String::new()
    }

    fn apply(&self, _staged: &String, Select(option): Select) -> Option<String> {
        self.options.contains(&option).then_some(option)
    }

    fn into_answer(value: String) -> AnswerValue {
        AnswerValue::Choice(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<String, AnswerValue> {
        match answer {
            AnswerValue::Choice(choice) => Ok(choice),
            other => Err(other),
        }
    }
}

/// Checkboxes: any number of options up to a cap.
#[derive(Debug, Clone)]
pub struct MultiChoice {
    options: Vec<String>,
    cap: usize,
}

impl MultiChoice {
    /// `max_selection` of `None` or 0 allows every option to be selected.
    pub fn new(options: Vec<String>, max_selection: Option<u32>) -> Self {
        let cap = selection_cap(max_selection, options.len());
        Self { options, cap }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// How many options may be selected at once.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl QuestionWidget for MultiChoice {
    /// Selected option texts, in the order they were checked.
    type Value = Vec<String>;
    type Event = Toggle;

    const KIND: QuestionKind = QuestionKind::MultiChoice;

    fn empty() -> Vec<String> {
        Vec::new()
    }

    fn apply(&self, staged: &Vec<String>, Toggle(option): Toggle) -> Option<Vec<String>> {
        if !self.options.contains(&option) {
            return None;
        }
        if staged.contains(&option) {
            return Some(staged.iter().filter(|o| **o != option).cloned().collect());
        }
        if staged.len() >= self.cap {
            return None;
        }
        let mut next = staged.clone();
        next.push(option);
        Some(next)
    }

    fn into_answer(value: Vec<String>) -> AnswerValue {
        AnswerValue::Choices(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<Vec<String>, AnswerValue> {
        match answer {
            AnswerValue::Choices(list) => Ok(list),
            other => Err(other),
        }
    }
}
