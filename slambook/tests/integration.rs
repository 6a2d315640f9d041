//! Integration tests for slambook

use std::sync::{Arc, Mutex};

use slambook::{
    AnswerValue, Answers, ChoiceOption, FileFetcher, FileHandle, FileUploader, FormBackend,
    Interaction, OptionDiff, PreviewRegistry, Question, QuestionDraft, QuestionId, QuestionKind,
    QuestionSet, ResponseBrowser, ScriptError, ScriptedBackend, SessionOptions, StoredResponse,
    SubmittedResponse, WidgetConfig, WidgetError, WidgetFactory, decode_responses,
    prepare_submission,
};

fn id(s: &str) -> QuestionId {
    QuestionId::from(s)
}

fn slambook() -> QuestionSet {
    let json = r#"{
        "slamtitle": "Class of 2024",
        "questions": [
            {"questionid": "q1", "questiontext": "Your name", "type": "Text_One",
             "is_required": true, "sequence": 1},
            {"questionid": "q2", "questiontext": "Describe me", "type": "Text_multi",
             "is_required": false, "sequence": 2},
            {"questionid": "q3", "questiontext": "Best memory together", "type": "MCQ",
             "is_required": false, "sequence": 3,
             "options": [{"optionid": "o1", "optiontext": "Trip"},
                         {"optionid": "o2", "optiontext": "Fest"}]},
            {"questionid": "q4", "questiontext": "Pick your snacks", "type": "MSQ",
             "is_required": false, "sequence": 4, "max_selection": 2,
             "options": [{"optionid": "o3", "optiontext": "A"},
                         {"optionid": "o4", "optiontext": "B"},
                         {"optionid": "o5", "optiontext": "C"}]},
            {"questionid": "q5", "questiontext": "Your birthday", "type": "DATE",
             "is_required": false, "sequence": 5},
            {"questionid": "q6", "questiontext": "How much will you miss me?", "type": "Bottle",
             "is_required": true, "sequence": 6},
            {"questionid": "q7", "questiontext": "A photo of us", "type": "IMAGE",
             "is_required": false, "sequence": 7},
            {"questionid": "q8", "questiontext": "Sign here", "type": "Sign",
             "is_required": false, "sequence": 8}
        ]
    }"#;
    serde_json::from_str(json).unwrap()
}

struct UrlUploader;

impl FileUploader for UrlUploader {
    fn upload(&mut self, file: &FileHandle) -> anyhow::Result<String> {
        Ok(format!("https://files.example/{}", file.name()))
    }
}

#[test]
fn fill_and_submit_a_slambook() {
    let set = slambook();
    assert_eq!(set.title, "Class of 2024");

    let answers = ScriptedBackend::new()
        .edit("q1", "Ada")
        .edit("q2", "Kind\nand loud")
        .select("q3", "Fest")
        .toggle("q4", "A")
        .toggle("q4", "C")
        .edit("q5", "2001-02-03")
        .slide("q6", 10)
        .pick_file("q7", FileHandle::new("us.jpg", vec![1u8, 2, 3]))
        .collect(&set, &Answers::new())
        .unwrap();

    let submission = prepare_submission(&set, &answers, &mut UrlUploader).unwrap();
    assert_eq!(
        submission.to_json(),
        serde_json::json!({
            "answers": {
                "q1": "Ada",
                "q2": "Kind\nand loud",
                "q3": ["o2"],
                "q4": ["o3", "o5"],
                "q5": "2001-02-03",
                "q6": 10,
                "q7": "https://files.example/us.jpg",
            }
        })
    );
}

#[test]
fn multi_choice_cap_scenario() {
    let set = slambook();
    let session = ScriptedBackend::new()
        .toggle("q4", "A")
        .toggle("q4", "B")
        .toggle("q4", "C")
        .play(&set, &Answers::new())
        .unwrap();
    assert_eq!(session.answers().get_choices(&id("q4")).unwrap(), ["A", "B"]);

    let session = ScriptedBackend::new()
        .toggle("q4", "A")
        .toggle("q4", "B")
        .toggle("q4", "A")
        .toggle("q4", "C")
        .play(&set, &Answers::new())
        .unwrap();
    assert_eq!(session.answers().get_choices(&id("q4")).unwrap(), ["B", "C"]);
}

#[test]
fn single_choice_keeps_last_selection() {
    let session = ScriptedBackend::new()
        .select("q3", "Trip")
        .select("q3", "Fest")
        .play(&slambook(), &Answers::new())
        .unwrap();
    assert_eq!(session.answers().get_choice(&id("q3")).unwrap(), "Fest");
}

#[test]
fn cleared_text_is_empty_not_absent() {
    let session = ScriptedBackend::new()
        .edit("q2", "hello")
        .edit("q2", "")
        .play(&slambook(), &Answers::new())
        .unwrap();
    let answers = session.answers();
    assert!(answers.contains(&id("q2")));
    assert_eq!(answers.get_text(&id("q2")).unwrap(), "");
}

#[test]
fn missing_required_answer_blocks_collection() {
    let err = ScriptedBackend::new()
        .slide("q6", 3)
        .collect(&slambook(), &Answers::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please answer required question: \"Your name\""
    );
}

#[test]
fn scale_zero_counts_as_answered() {
    let mut initial = Answers::new();
    initial.insert("q6", 0u8);
    let answers = ScriptedBackend::new()
        .edit("q1", "Ada")
        .collect(&slambook(), &initial)
        .unwrap();
    assert_eq!(answers.get_scale(&id("q6")).unwrap(), 0);
}

#[test]
fn script_errors_name_the_step() {
    let err = ScriptedBackend::new()
        .edit("q1", "Ada")
        .slide("q1", 4)
        .play(&slambook(), &Answers::new())
        .unwrap_err();
    assert!(matches!(err, ScriptError::Step { index: 1, .. }));
}

#[test]
fn signature_previews_do_not_leak() {
    let registry = PreviewRegistry::new();
    let backend = (0..10u8)
        .fold(
            ScriptedBackend::new().with_factory(WidgetFactory::new(registry.clone())),
            |backend, i| backend.pick_file("q8", FileHandle::new(format!("sig{i}.png"), vec![i])),
        );

    let session = backend.play(&slambook(), &Answers::new()).unwrap();
    assert_eq!(registry.live_count(), 1);

    drop(session);
    assert_eq!(registry.live_count(), 0);
}

#[test]
fn unknown_type_is_reported_not_skipped() {
    let question = Question::with_tag("q9", "Rate us", "STARS");
    let err = WidgetFactory::default()
        .build(&question, WidgetConfig::new(question.text()))
        .unwrap_err();
    assert!(matches!(err, WidgetError::Unsupported(_)));
}

#[test]
fn external_reset_overrides_staged_value() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let question = Question::new("mood", "Mood", QuestionKind::NumericScale);
    let mut widget = WidgetFactory::default()
        .build(
            &question,
            WidgetConfig::new("Mood").on_answer_change(move |v| sink.lock().unwrap().push(v)),
        )
        .unwrap();

    assert_eq!(widget.value(), AnswerValue::Scale(0));
    widget.interact(Interaction::Slide(10)).unwrap();
    widget.sync(Some(AnswerValue::Scale(3))).unwrap();

    assert_eq!(widget.value(), AnswerValue::Scale(3));
    assert_eq!(*calls.lock().unwrap(), [AnswerValue::Scale(10)]);
}

#[test]
fn browsing_responses_is_read_only() {
    let set = slambook();
    let filled = ScriptedBackend::new()
        .edit("q1", "Ada")
        .slide("q6", 7)
        .collect(&set, &Answers::new())
        .unwrap();
    let responses = vec![
        SubmittedResponse::new("r1", filled),
        SubmittedResponse::new("r2", Answers::new()),
    ];

    let mut browser = ResponseBrowser::new(set, &WidgetFactory::default(), responses).unwrap();
    let name = |browser: &ResponseBrowser| {
        browser
            .session()
            .field(&id("q1"))
            .unwrap()
            .widget()
            .unwrap()
            .value()
    };
    assert_eq!(name(&browser), AnswerValue::Text("Ada".into()));

    browser.next().unwrap();
    assert_eq!(name(&browser), AnswerValue::Text(String::new()));
    assert!(browser.session().answers().is_empty());
}

struct NoFiles;

impl FileFetcher for NoFiles {
    fn fetch(&mut self, name: &str) -> anyhow::Result<FileHandle> {
        anyhow::bail!("{name} is gone")
    }
}

#[test]
fn stored_responses_browse_by_question() {
    let set = slambook();
    let stored: Vec<StoredResponse> = serde_json::from_str(
        r#"[
            {"responseid": "r1", "created": "2024-05-01T09:00:00Z", "answers": [
                {"questionid": "q1", "answer_text": "Ada"},
                {"questionid": "q6", "bottle_value": 4},
                {"questionid": "q8", "answer_image": "sig-r1.png"}
            ]},
            {"responseid": "r2", "created": "2024-05-02T18:30:00Z", "answers": [
                {"questionid": "q1", "answer_text": "Grace"},
                {"questionid": "q4", "answer_option": [{"optiontext": "B"}, {"optiontext": "C"}]}
            ]}
        ]"#,
    )
    .unwrap();
    let responses = decode_responses(&set, stored, &mut NoFiles);
    let mut browser = ResponseBrowser::new(set, &WidgetFactory::default(), responses).unwrap();

    let names: Vec<_> = browser
        .answers_for(&id("q1"))
        .into_iter()
        .map(|(response, answer)| (response.label(), answer.as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        names,
        [
            ("Response from 2024-05-01 09:00".to_string(), "Ada".to_string()),
            ("Response from 2024-05-02 18:30".to_string(), "Grace".to_string()),
        ]
    );
    assert!(browser.answers_for(&id("q2")).is_empty());
    assert_eq!(
        browser.answers_for(&id("q8"))[0].1,
        &AnswerValue::File(None)
    );

    browser.select_question(7).unwrap();
    assert!(!browser.has_next_question());
    assert_eq!(browser.next_question().unwrap().id(), &id("q8"));

    assert_eq!(browser.next().unwrap().id, "r2");
    assert_eq!(browser.next().unwrap().id, "r2");
    assert!(!browser.has_next());
    assert_eq!(
        browser.session().answers().get_choices(&id("q4")).unwrap(),
        ["B", "C"]
    );
}

#[test]
fn preview_session_ignores_every_interaction() {
    let set = slambook();
    let mut session = slambook::FormSession::new(
        set.clone(),
        &WidgetFactory::default(),
        SessionOptions::new().preview_mode(true),
    );
    let interactions = [
        ("q1", Interaction::Edit("x".into())),
        ("q3", Interaction::Select("Trip".into())),
        ("q4", Interaction::Toggle("A".into())),
        ("q6", Interaction::Slide(4)),
        ("q8", Interaction::PickFile(FileHandle::new("s.png", vec![0u8]))),
    ];
    for (q, interaction) in interactions {
        assert!(!session.interact(&id(q), interaction).unwrap());
    }
    assert!(session.answers().is_empty());
}

#[test]
fn authored_question_can_be_answered() {
    let mut set = QuestionSet::empty().with_title("Draft book");
    let mut draft = QuestionDraft::new("Favourite snacks", QuestionKind::MultiChoice);
    draft.options = vec!["Chips".into(), " ".into(), "Fruit".into()];
    set.push(draft.to_question("snacks", 0).unwrap());
    set.push(
        QuestionDraft::new("Your name", QuestionKind::ShortText)
            .to_question("name", 1)
            .unwrap(),
    );

    let snacks = set.get(&id("snacks")).unwrap();
    assert_eq!(snacks.max_selection(), Some(2));
    assert_eq!(snacks.option_texts(), ["Chips", "Fruit"]);

    let answers = ScriptedBackend::new()
        .toggle("snacks", "Fruit")
        .toggle("snacks", "Chips")
        .collect(&set, &Answers::new())
        .unwrap();
    assert_eq!(answers.get_choices(&id("snacks")).unwrap(), ["Fruit", "Chips"]);

    let (_, sequences) = set.remove(&id("snacks")).unwrap();
    assert_eq!(sequences, [(id("name"), 0)]);
}

#[test]
fn editing_options_yields_a_diff() {
    let saved = [
        ChoiceOption::with_id("o1", "Chips"),
        ChoiceOption::with_id("o2", "Fruit"),
    ];
    let diff = OptionDiff::between(&saved, &["Fruit".to_string(), "Cake".to_string()]);
    assert_eq!(diff.delete, [ChoiceOption::with_id("o1", "Chips")]);
    assert_eq!(diff.add, ["Cake"]);
}
