use slambook::{Question, QuestionKind, QuestionSet};

/// A short slambook. The last question uses a type this version does not
/// know, to show how unsupported questions are rendered.
pub fn friendship() -> QuestionSet {
    QuestionSet::new(vec![
        Question::new("name", "Your name", QuestionKind::ShortText)
            .required()
            .with_sequence(1),
        Question::new("color", "Favourite colour?", QuestionKind::SingleChoice)
            .with_options(["Red", "Green", "Blue"])
            .with_sequence(2),
        Question::new("songs", "Songs that remind you of me", QuestionKind::MultiChoice)
            .with_options(["Yellow", "Count on Me", "Hall of Fame"])
            .with_sequence(3),
        Question::with_tag("stars", "Rate our friendship", "RATING").with_sequence(4),
    ])
    .with_title("Friendship")
}
