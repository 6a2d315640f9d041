use slambook::QuestionSet;

/// A question set as the backend serves it, with every question type.
pub const CLASS_OF_2024_JSON: &str = include_str!("../fixtures/class_of_2024.json");

/// Parse [`CLASS_OF_2024_JSON`].
pub fn class_of_2024() -> anyhow::Result<QuestionSet> {
    Ok(serde_json::from_str(CLASS_OF_2024_JSON)?)
}
