//! Type-tag dispatch: from a question descriptor to a concrete widget.

use slambook_types::{AnswerValue, FileHandle, Question, QuestionKind, UnsupportedQuestionType};
use thiserror::Error;
use tracing::warn;

use crate::contract::{QuestionWidget, Widget, WidgetConfig};
use crate::preview::{PreviewRegistry, PreviewUrl};
use crate::variants::{
    DateInput, Edit, FileEvent, ImageFile, LongText, MultiChoice, NumericScale, Select, ShortText,
    SignatureFile, SingleChoice, Slide, Toggle,
};

/// Error type for building and driving widgets through the type-erased API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The descriptor's type tag is not in the dispatch table.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedQuestionType),

    /// An answer of the wrong shape was handed to a widget.
    #[error("A {actual} answer does not fit a {kind} question")]
    ShapeMismatch {
        kind: QuestionKind,
        actual: &'static str,
    },

    /// An interaction that this kind of widget cannot receive.
    #[error("Interaction {interaction} does not apply to a {kind} question")]
    InteractionMismatch {
        kind: QuestionKind,
        interaction: &'static str,
    },
}

/// Any user interaction, independent of the widget kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Choose an option of a single-choice question.
    Select(String),
    /// Check or uncheck an option of a multi-choice question.
    Toggle(String),
    /// Replace the content of a text or date input.
    Edit(String),
    /// Move a numeric-scale slider.
    Slide(i64),
    /// Choose a file for an image or signature question.
    PickFile(FileHandle),
    /// Remove the chosen file.
    ClearFile,
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select(_) => "Select",
            Self::Toggle(_) => "Toggle",
            Self::Edit(_) => "Edit",
            Self::Slide(_) => "Slide",
            Self::PickFile(_) => "PickFile",
            Self::ClearFile => "ClearFile",
        }
    }
}

/// A widget of any kind.
#[derive(Debug)]
pub enum AnyWidget {
    SingleChoice(Widget<SingleChoice>),
    MultiChoice(Widget<MultiChoice>),
    ShortText(Widget<ShortText>),
    LongText(Widget<LongText>),
    ImageFile(Widget<ImageFile>),
    Date(Widget<DateInput>),
    NumericScale(Widget<NumericScale>),
    SignatureFile(Widget<SignatureFile>),
}

/// Run `$body` with `$w` bound to the inner `Widget<_>` of whichever variant `$widget` is.
macro_rules! with_widget {
    ($widget:expr, $w:ident => $body:expr) => {
        match $widget {
            AnyWidget::SingleChoice($w) => $body,
            AnyWidget::MultiChoice($w) => $body,
            AnyWidget::ShortText($w) => $body,
            AnyWidget::LongText($w) => $body,
            AnyWidget::ImageFile($w) => $body,
            AnyWidget::Date($w) => $body,
            AnyWidget::NumericScale($w) => $body,
            AnyWidget::SignatureFile($w) => $body,
        }
    };
}

fn sync_typed<V: QuestionWidget>(
    widget: &mut Widget<V>,
    external: Option<AnswerValue>,
) -> Result<(), WidgetError> {
    let external = external
        .map(|answer| V::from_answer(answer).map_err(|a| shape_mismatch::<V>(&a)))
        .transpose()?;
    widget.sync(external);
    Ok(())
}

fn shape_mismatch<V: QuestionWidget>(answer: &AnswerValue) -> WidgetError {
    WidgetError::ShapeMismatch {
        kind: V::KIND,
        actual: answer.type_name(),
    }
}

impl AnyWidget {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::SingleChoice(_) => SingleChoice::KIND,
            Self::MultiChoice(_) => MultiChoice::KIND,
            Self::ShortText(_) => ShortText::KIND,
            Self::LongText(_) => LongText::KIND,
            Self::ImageFile(_) => ImageFile::KIND,
            Self::Date(_) => DateInput::KIND,
            Self::NumericScale(_) => NumericScale::KIND,
            Self::SignatureFile(_) => SignatureFile::KIND,
        }
    }

    pub fn question_text(&self) -> &str {
        with_widget!(self, w => w.question_text())
    }

    pub fn is_required(&self) -> bool {
        with_widget!(self, w => w.is_required())
    }

    pub fn is_preview(&self) -> bool {
        with_widget!(self, w => w.is_preview())
    }

    pub fn set_preview(&mut self, preview: bool) {
        with_widget!(self, w => w.set_preview(preview))
    }

    /// The displayed value as an answer.
    pub fn value(&self) -> AnswerValue {
        match self {
            Self::SingleChoice(w) => SingleChoice::into_answer(w.value().clone()),
            Self::MultiChoice(w) => MultiChoice::into_answer(w.value().clone()),
            Self::ShortText(w) => ShortText::into_answer(w.value().clone()),
            Self::LongText(w) => LongText::into_answer(w.value().clone()),
            Self::ImageFile(w) => ImageFile::into_answer(w.value().clone()),
            Self::Date(w) => DateInput::into_answer(w.value().clone()),
            Self::NumericScale(w) => NumericScale::into_answer(*w.value()),
            Self::SignatureFile(w) => SignatureFile::into_answer(w.value().clone()),
        }
    }

    /// Options of a choice widget, empty for other kinds.
    pub fn options(&self) -> &[String] {
        match self {
            Self::SingleChoice(w) => w.variant().options(),
            Self::MultiChoice(w) => w.variant().options(),
            _ => &[],
        }
    }

    /// Selection cap of a multi-choice widget.
    pub fn selection_cap(&self) -> Option<usize> {
        match self {
            Self::MultiChoice(w) => Some(w.variant().cap()),
            _ => None,
        }
    }

    /// Local preview of a signature widget's staged file.
    pub fn preview_url(&self) -> Option<&PreviewUrl> {
        match self {
            Self::SignatureFile(w) => w.variant().preview(),
            _ => None,
        }
    }

    /// Route an interaction to the widget.
    ///
    /// Returns whether a change was committed. An interaction meant for another
    /// kind of widget is a caller error.
    pub fn interact(&mut self, interaction: Interaction) -> Result<bool, WidgetError> {
        let kind = self.kind();
        let committed = match (self, interaction) {
            (Self::SingleChoice(w), Interaction::Select(option)) => w.interact(Select(option)),
            (Self::MultiChoice(w), Interaction::Toggle(option)) => w.interact(Toggle(option)),
            (Self::ShortText(w), Interaction::Edit(text)) => w.interact(Edit(text)),
            (Self::LongText(w), Interaction::Edit(text)) => w.interact(Edit(text)),
            (Self::Date(w), Interaction::Edit(text)) => w.interact(Edit(text)),
            (Self::NumericScale(w), Interaction::Slide(raw)) => w.interact(Slide(raw)),
            (Self::ImageFile(w), Interaction::PickFile(file)) => w.interact(FileEvent::Pick(file)),
            (Self::ImageFile(w), Interaction::ClearFile) => w.interact(FileEvent::Clear),
            (Self::SignatureFile(w), Interaction::PickFile(file)) => {
                w.interact(FileEvent::Pick(file))
            }
            (Self::SignatureFile(w), Interaction::ClearFile) => w.interact(FileEvent::Clear),
            (_, other) => {
                return Err(WidgetError::InteractionMismatch {
                    kind,
                    interaction: other.name(),
                });
            }
        };
        Ok(committed)
    }

    /// Observe the externally held answer; `None` means the empty sentinel.
    pub fn sync(&mut self, external: Option<AnswerValue>) -> Result<(), WidgetError> {
        match self {
            Self::SingleChoice(w) => sync_typed(w, external),
            Self::MultiChoice(w) => sync_typed(w, external),
            Self::ShortText(w) => sync_typed(w, external),
            Self::LongText(w) => sync_typed(w, external),
            Self::ImageFile(w) => sync_typed(w, external),
            Self::Date(w) => sync_typed(w, external),
            Self::NumericScale(w) => sync_typed(w, external),
            Self::SignatureFile(w) => sync_typed(w, external),
        }
    }

    /// Observe the empty sentinel, as after the answer map was cleared.
    pub fn clear(&mut self) {
        with_widget!(self, w => w.sync(None))
    }
}

/// The dispatch table from type tag to widget constructor.
///
/// Holds what variants need beyond the descriptor: the registry signature
/// previews are issued from.
#[derive(Debug, Clone, Default)]
pub struct WidgetFactory {
    previews: PreviewRegistry,
}

impl WidgetFactory {
    pub fn new(previews: PreviewRegistry) -> Self {
        Self { previews }
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Build the widget for `question`.
    ///
    /// Fails for an unknown type tag, and for a current value whose shape does
    /// not match the question kind.
    pub fn build(
        &self,
        question: &Question,
        config: WidgetConfig<AnswerValue>,
    ) -> Result<AnyWidget, WidgetError> {
        let kind = question.kind().inspect_err(|err| {
            warn!(question = %question.id(), tag = %err.0, "no widget for question type");
        })?;

        let widget = match kind {
            QuestionKind::SingleChoice => AnyWidget::SingleChoice(typed(
                SingleChoice::new(question.option_texts()),
                config,
            )?),
            QuestionKind::MultiChoice => AnyWidget::MultiChoice(typed(
                MultiChoice::new(question.option_texts(), question.max_selection()),
                config,
            )?),
            QuestionKind::ShortText => AnyWidget::ShortText(typed(ShortText, config)?),
            QuestionKind::LongText => AnyWidget::LongText(typed(LongText, config)?),
            QuestionKind::ImageFile => AnyWidget::ImageFile(typed(ImageFile, config)?),
            QuestionKind::Date => AnyWidget::Date(typed(DateInput, config)?),
            QuestionKind::NumericScale => AnyWidget::NumericScale(typed(NumericScale, config)?),
            QuestionKind::SignatureFile => AnyWidget::SignatureFile(typed(
                SignatureFile::new(self.previews.clone()),
                config,
            )?),
        };
        Ok(widget)
    }
}

fn typed<V: QuestionWidget>(
    variant: V,
    config: WidgetConfig<AnswerValue>,
) -> Result<Widget<V>, WidgetError> {
    let config = config.try_map_value(|answer| {
        V::from_answer(answer).map_err(|a| shape_mismatch::<V>(&a))
    })?;
    Ok(Widget::new(variant, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::testing::Recorder;

    fn build(question: &Question, config: WidgetConfig<AnswerValue>) -> AnyWidget {
        WidgetFactory::default().build(question, config).unwrap()
    }

    fn every_kind() -> Vec<Question> {
        QuestionKind::ALL
            .into_iter()
            .map(|kind| {
                Question::new(kind.tag(), format!("{} question", kind.label()), kind)
                    .with_options(["A", "B", "C"])
            })
            .collect()
    }

    /// One interaction per kind that changes an empty widget.
    fn poke(kind: QuestionKind) -> Interaction {
        match kind {
            QuestionKind::SingleChoice => Interaction::Select("A".to_string()),
            QuestionKind::MultiChoice => Interaction::Toggle("A".to_string()),
            QuestionKind::ShortText | QuestionKind::LongText => Interaction::Edit("x".to_string()),
            QuestionKind::Date => Interaction::Edit("2020-01-01".to_string()),
            QuestionKind::NumericScale => Interaction::Slide(5),
            QuestionKind::ImageFile | QuestionKind::SignatureFile => {
                Interaction::PickFile(FileHandle::new("f.png", vec![0u8]))
            }
        }
    }

    #[test]
    fn table_covers_every_kind() {
        for question in every_kind() {
            let widget = build(&question, WidgetConfig::new(question.text()));
            assert_eq!(Ok(widget.kind()), question.kind());
            assert_eq!(widget.value(), widget.kind().empty_answer());
        }
    }

    #[test]
    fn unknown_tag_is_reported() {
        let question = Question::with_tag("q", "Stars?", "RATING");
        let err = WidgetFactory::default()
            .build(&question, WidgetConfig::new(question.text()))
            .unwrap_err();
        assert_eq!(
            err,
            WidgetError::Unsupported(UnsupportedQuestionType("RATING".to_string()))
        );
        assert_eq!(err.to_string(), "Unsupported question type: \"RATING\"");
    }

    #[test]
    fn mismatched_initial_value_is_reported() {
        let question = Question::new("q", "Mood", QuestionKind::NumericScale);
        let err = WidgetFactory::default()
            .build(&question, WidgetConfig::new("Mood").value("high".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            WidgetError::ShapeMismatch {
                kind: QuestionKind::NumericScale,
                actual: "Text"
            }
        ));
    }

    #[test]
    fn every_kind_is_inert_in_preview() {
        for question in every_kind() {
            let recorder = Recorder::default();
            let mut widget = build(
                &question,
                WidgetConfig::new(question.text())
                    .preview(true)
                    .on_answer_change(recorder.callback()),
            );
            let before = widget.value();
            assert_eq!(widget.interact(poke(widget.kind())), Ok(false));
            assert_eq!(widget.value(), before);
            assert!(recorder.calls().is_empty(), "{}", widget.kind());
        }
    }

    #[test]
    fn every_kind_reports_changes() {
        for question in every_kind() {
            let recorder = Recorder::default();
            let mut widget = build(
                &question,
                WidgetConfig::new(question.text()).on_answer_change(recorder.callback()),
            );
            assert_eq!(widget.interact(poke(widget.kind())), Ok(true));
            assert_eq!(recorder.calls(), vec![widget.value()]);
        }
    }

    #[test]
    fn every_kind_resyncs_to_external_value() {
        let external = |kind: QuestionKind| match kind {
            QuestionKind::SingleChoice => AnswerValue::Choice("B".to_string()),
            QuestionKind::MultiChoice => AnswerValue::Choices(vec!["C".to_string()]),
            QuestionKind::ShortText | QuestionKind::LongText => "outside".into(),
            QuestionKind::Date => AnswerValue::Date("1999-12-31".to_string()),
            QuestionKind::NumericScale => AnswerValue::Scale(9),
            QuestionKind::ImageFile | QuestionKind::SignatureFile => {
                FileHandle::new("outside.png", vec![1u8]).into()
            }
        };
        for question in every_kind() {
            let recorder = Recorder::default();
            let mut widget = build(
                &question,
                WidgetConfig::new(question.text()).on_answer_change(recorder.callback()),
            );
            let kind = widget.kind();
            widget.interact(poke(kind)).unwrap();
            widget.sync(Some(external(kind))).unwrap();
            assert_eq!(widget.value(), external(kind), "{kind}");
            assert_eq!(recorder.calls().len(), 1, "resync must not call back");
        }
    }

    #[test]
    fn every_kind_clears_after_observing_a_value() {
        for question in every_kind() {
            let mut widget = build(&question, WidgetConfig::new(question.text()));
            let kind = widget.kind();
            widget.interact(poke(kind)).unwrap();
            let committed = widget.value();
            widget.sync(Some(committed)).unwrap();

            widget.clear();
            assert_eq!(widget.value(), kind.empty_answer(), "{kind}");
        }
    }

    #[test]
    fn wrong_interaction_is_an_error() {
        let question = Question::new("q", "Name", QuestionKind::ShortText);
        let mut widget = build(&question, WidgetConfig::new("Name"));
        assert_eq!(
            widget.interact(Interaction::Slide(3)),
            Err(WidgetError::InteractionMismatch {
                kind: QuestionKind::ShortText,
                interaction: "Slide"
            })
        );
    }

    #[test]
    fn wrong_shape_on_sync_is_an_error() {
        let question = Question::new("q", "When?", QuestionKind::Date);
        let mut widget = build(&question, WidgetConfig::new("When?"));
        assert!(widget.sync(Some(AnswerValue::Scale(1))).is_err());
        assert_eq!(widget.value(), AnswerValue::Date(String::new()));
    }

    #[test]
    fn signature_preview_is_exposed() {
        let factory = WidgetFactory::default();
        let question = Question::new("s", "Sign", QuestionKind::SignatureFile);
        let mut widget = factory
            .build(&question, WidgetConfig::new("Sign"))
            .unwrap();
        widget
            .interact(Interaction::PickFile(FileHandle::new("s.png", vec![7u8])))
            .unwrap();
        let url = widget.preview_url().unwrap();
        assert_eq!(factory.previews().resolve(url.as_str()).unwrap().bytes(), &[7]);
    }
}
