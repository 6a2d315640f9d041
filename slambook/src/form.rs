//! A form session: one widget per question, wired to a shared answer map.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use slambook_types::{Answers, Question, QuestionId, QuestionSet, RequiredError};
use thiserror::Error;
use tracing::debug;

use crate::contract::WidgetConfig;
use crate::dispatch::{AnyWidget, Interaction, WidgetError, WidgetFactory};

/// Error type for [`FormSession`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormSessionError {
    #[error("No question with id {0}")]
    UnknownQuestion(QuestionId),

    #[error("Question {id}: {source}")]
    Widget {
        id: QuestionId,
        #[source]
        source: WidgetError,
    },
}

/// How a session starts.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    preview_mode: bool,
    initial_answers: Answers,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every widget inert, for showing existing responses.
    pub fn preview_mode(mut self, preview_mode: bool) -> Self {
        self.preview_mode = preview_mode;
        self
    }

    /// Pre-populate the answer map and the widgets.
    pub fn initial_answers(mut self, answers: Answers) -> Self {
        self.initial_answers = answers;
        self
    }
}

/// A question together with its widget, or the reason it has none.
#[derive(Debug)]
pub struct FormField {
    question: Question,
    widget: Result<AnyWidget, WidgetError>,
}

impl FormField {
    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn widget(&self) -> Result<&AnyWidget, &WidgetError> {
        self.widget.as_ref()
    }

    fn widget_mut(&mut self) -> Result<&mut AnyWidget, FormSessionError> {
        self.widget
            .as_mut()
            .map_err(|source| FormSessionError::Widget {
                id: self.question.id().clone(),
                source: source.clone(),
            })
    }
}

fn lock(answers: &Mutex<Answers>) -> MutexGuard<'_, Answers> {
    answers.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The aggregator behind a rendered question set.
///
/// Widgets report committed answers into the shared map; the map is pushed
/// back into the widgets after every change, so the widgets always mirror it.
#[derive(Debug)]
pub struct FormSession {
    set: QuestionSet,
    fields: Vec<FormField>,
    answers: Arc<Mutex<Answers>>,
    preview_mode: bool,
}

impl FormSession {
    /// Build one widget per question, in display order.
    ///
    /// Questions whose widget cannot be built keep the error, so renderers can
    /// show it in place of the control.
    pub fn new(set: QuestionSet, factory: &WidgetFactory, options: SessionOptions) -> Self {
        let SessionOptions {
            preview_mode,
            initial_answers,
        } = options;
        let answers = Arc::new(Mutex::new(initial_answers));
        let fields = set
            .questions()
            .iter()
            .map(|question| {
                let id = question.id().clone();
                let current = lock(&answers).get(&id).cloned();
                let sink = Arc::clone(&answers);
                let config = WidgetConfig::new(question.text())
                    .required(question.is_required())
                    .preview(preview_mode)
                    .value_opt(current)
                    .on_answer_change(move |value| {
                        lock(&sink).insert(id.clone(), value);
                    });
                FormField {
                    question: question.clone(),
                    widget: factory.build(question, config),
                }
            })
            .collect();
        Self {
            set,
            fields,
            answers,
            preview_mode,
        }
    }

    pub fn question_set(&self) -> &QuestionSet {
        &self.set
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, id: &QuestionId) -> Option<&FormField> {
        self.fields.iter().find(|field| field.question.id() == id)
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn set_preview_mode(&mut self, preview_mode: bool) {
        self.preview_mode = preview_mode;
        for widget in self.fields.iter_mut().filter_map(|f| f.widget.as_mut().ok()) {
            widget.set_preview(preview_mode);
        }
    }

    /// Route a user interaction to the widget of question `id`.
    ///
    /// Returns whether the answer changed.
    pub fn interact(
        &mut self,
        id: &QuestionId,
        interaction: Interaction,
    ) -> Result<bool, FormSessionError> {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.question.id() == id)
            .ok_or_else(|| FormSessionError::UnknownQuestion(id.clone()))?;
        let widget = field.widget_mut()?;
        let committed = widget
            .interact(interaction)
            .map_err(|source| FormSessionError::Widget {
                id: id.clone(),
                source,
            })?;
        if committed {
            let current = lock(&self.answers).get(id).cloned();
            widget
                .sync(current)
                .map_err(|source| FormSessionError::Widget {
                    id: id.clone(),
                    source,
                })?;
        }
        Ok(committed)
    }

    /// Replace the answer map and resync every widget to it.
    ///
    /// Questions missing from `answers` fall back to their empty sentinel.
    /// Nothing changes if any answer has the wrong shape for its question.
    pub fn load_answers(&mut self, answers: &Answers) -> Result<(), FormSessionError> {
        for field in &self.fields {
            let (Ok(widget), Some(value)) = (&field.widget, answers.get(field.question.id()))
            else {
                continue;
            };
            if !value.fits(widget.kind()) {
                return Err(FormSessionError::Widget {
                    id: field.question.id().clone(),
                    source: WidgetError::ShapeMismatch {
                        kind: widget.kind(),
                        actual: value.type_name(),
                    },
                });
            }
        }

        *lock(&self.answers) = answers.clone();
        debug!(answers = answers.len(), "resyncing form widgets");
        self.resync()
    }

    /// Snapshot of the collected answers.
    pub fn answers(&self) -> Answers {
        lock(&self.answers).clone()
    }

    pub fn check_required(&self) -> Result<(), RequiredError> {
        lock(&self.answers).check_required(&self.set)
    }

    pub fn unanswered_required(&self) -> Vec<&Question> {
        lock(&self.answers).unanswered_required(&self.set)
    }

    /// Clear the answer map and return every widget to its empty sentinel.
    pub fn reset(&mut self) {
        lock(&self.answers).clear();
        debug!("form reset");
        for widget in self.fields.iter_mut().filter_map(|f| f.widget.as_mut().ok()) {
            widget.clear();
        }
    }

    fn resync(&mut self) -> Result<(), FormSessionError> {
        let answers = lock(&self.answers).clone();
        for field in &mut self.fields {
            let id = field.question.id();
            if let Ok(widget) = field.widget.as_mut() {
                widget
                    .sync(answers.get(id).cloned())
                    .map_err(|source| FormSessionError::Widget {
                        id: id.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use slambook_types::{AnswerValue, FileHandle, QuestionKind};

    use super::*;

    fn set() -> QuestionSet {
        QuestionSet::new(vec![
            Question::new("name", "Your name", QuestionKind::ShortText)
                .required()
                .with_sequence(1),
            Question::new("color", "Favourite color", QuestionKind::SingleChoice)
                .with_options(["Red", "Blue"])
                .with_sequence(2),
            Question::new("mood", "Mood today", QuestionKind::NumericScale).with_sequence(3),
            Question::with_tag("stars", "Stars?", "RATING").with_sequence(4),
        ])
    }

    fn session(options: SessionOptions) -> FormSession {
        FormSession::new(set(), &WidgetFactory::default(), options)
    }

    fn id(s: &str) -> QuestionId {
        QuestionId::from(s)
    }

    #[test]
    fn interactions_land_in_the_answer_map() {
        let mut form = session(SessionOptions::new());
        assert!(form.interact(&id("name"), Interaction::Edit("Ada".into())).unwrap());
        assert!(form.interact(&id("color"), Interaction::Select("Blue".into())).unwrap());

        let answers = form.answers();
        assert_eq!(answers.get_text(&id("name")).unwrap(), "Ada");
        assert_eq!(answers.get_choice(&id("color")).unwrap(), "Blue");
        assert!(!answers.contains(&id("mood")));
    }

    #[test]
    fn cleared_text_stays_in_the_map() {
        let mut form = session(SessionOptions::new());
        form.interact(&id("name"), Interaction::Edit("hello".into())).unwrap();
        form.interact(&id("name"), Interaction::Edit(String::new())).unwrap();
        assert_eq!(form.answers().get_text(&id("name")).unwrap(), "");
    }

    #[test]
    fn unknown_id_and_unsupported_question() {
        let mut form = session(SessionOptions::new());
        assert_eq!(
            form.interact(&id("nope"), Interaction::Slide(1)),
            Err(FormSessionError::UnknownQuestion(id("nope")))
        );
        let err = form.interact(&id("stars"), Interaction::Slide(1)).unwrap_err();
        assert!(matches!(
            err,
            FormSessionError::Widget {
                source: WidgetError::Unsupported(_),
                ..
            }
        ));
        assert!(form.field(&id("stars")).unwrap().widget().is_err());
    }

    #[test]
    fn fields_follow_sequence() {
        let form = session(SessionOptions::new());
        let ids: Vec<_> = form.fields().iter().map(|f| f.question().id().as_str()).collect();
        assert_eq!(ids, ["name", "color", "mood", "stars"]);
    }

    #[test]
    fn initial_answers_populate_widgets() {
        let mut initial = Answers::new();
        initial.insert("mood", 7u8);
        let form = session(SessionOptions::new().initial_answers(initial));
        let mood = form.field(&id("mood")).unwrap().widget().unwrap();
        assert_eq!(mood.value(), AnswerValue::Scale(7));
    }

    #[test]
    fn load_answers_resyncs_and_fills_gaps() {
        let mut form = session(SessionOptions::new());
        form.interact(&id("name"), Interaction::Edit("Ada".into())).unwrap();

        let mut loaded = Answers::new();
        loaded.insert("mood", 4u8);
        form.load_answers(&loaded).unwrap();

        let name = form.field(&id("name")).unwrap().widget().unwrap();
        assert_eq!(name.value(), AnswerValue::Text(String::new()));
        let mood = form.field(&id("mood")).unwrap().widget().unwrap();
        assert_eq!(mood.value(), AnswerValue::Scale(4));
        assert_eq!(form.answers(), loaded);
    }

    #[test]
    fn load_answers_rejects_wrong_shapes() {
        let mut form = session(SessionOptions::new());
        form.interact(&id("name"), Interaction::Edit("Ada".into())).unwrap();

        let mut loaded = Answers::new();
        loaded.insert("name", FileHandle::new("x.png", vec![0u8]));
        assert!(form.load_answers(&loaded).is_err());
        assert_eq!(form.answers().get_text(&id("name")).unwrap(), "Ada");
    }

    #[test]
    fn required_check_and_reset() {
        let mut form = session(SessionOptions::new());
        let err = form.check_required().unwrap_err();
        assert_eq!(err.to_string(), "Please answer required question: \"Your name\"");
        assert_eq!(form.unanswered_required().len(), 1);

        form.interact(&id("name"), Interaction::Edit("Ada".into())).unwrap();
        assert!(form.check_required().is_ok());

        form.reset();
        assert!(form.answers().is_empty());
        let name = form.field(&id("name")).unwrap().widget().unwrap();
        assert_eq!(name.value(), AnswerValue::Text(String::new()));
    }

    #[test]
    fn preview_session_ignores_input() {
        let mut form = session(SessionOptions::new().preview_mode(true));
        assert!(!form.interact(&id("mood"), Interaction::Slide(9)).unwrap());
        assert!(form.answers().is_empty());

        form.set_preview_mode(false);
        assert!(form.interact(&id("mood"), Interaction::Slide(9)).unwrap());
        assert_eq!(form.answers().get_scale(&id("mood")).unwrap(), 9);
    }
}
