use slambook::{ChoiceOption, Question, QuestionKind, QuestionSet};

/// A farewell slambook built in code, one question of each type.
pub fn farewell() -> QuestionSet {
    QuestionSet::new(vec![
        Question::new("nick", "What should we call you?", QuestionKind::ShortText)
            .required()
            .with_sequence(1),
        Question::new("memory", "Your favourite memory of us", QuestionKind::LongText)
            .with_sequence(2),
        Question::new("first-met", "Where did we first meet?", QuestionKind::SingleChoice)
            .with_choice_options(vec![
                ChoiceOption::with_id("fm-1", "School"),
                ChoiceOption::with_id("fm-2", "Tuition"),
                ChoiceOption::with_id("fm-3", "Online"),
            ])
            .required()
            .with_sequence(3),
        Question::new("describe", "Three words that describe me", QuestionKind::MultiChoice)
            .with_choice_options(vec![
                ChoiceOption::with_id("d-1", "Funny"),
                ChoiceOption::with_id("d-2", "Loud"),
                ChoiceOption::with_id("d-3", "Kind"),
                ChoiceOption::with_id("d-4", "Lazy"),
                ChoiceOption::with_id("d-5", "Clever"),
            ])
            .with_max_selection(3)
            .with_sequence(4),
        Question::new("birthday", "When is your birthday?", QuestionKind::Date).with_sequence(5),
        Question::new("miss", "How much will you miss me?", QuestionKind::NumericScale)
            .with_sequence(6),
        Question::new("photo", "A photo of us", QuestionKind::ImageFile).with_sequence(7),
        Question::new("sign", "Your autograph", QuestionKind::SignatureFile).with_sequence(8),
    ])
    .with_title("Farewell")
}
