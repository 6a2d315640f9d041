use slambook_types::{AnswerValue, QuestionKind, SCALE_MAX};

use crate::contract::QuestionWidget;

/// Move the slider to this raw position. Positions outside 0-10 are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide(pub i64);

/// Slider from 0 to [`SCALE_MAX`], starting at 0.
#[derive(Debug, Clone, Default)]
pub struct NumericScale;

impl QuestionWidget for NumericScale {
    type Value = u8;
    type Event = Slide;

    const KIND: QuestionKind = QuestionKind::NumericScale;

    fn empty() -> u8 {
        0
    }

    fn apply(&self, _staged: &u8, Slide(raw): Slide) -> Option<u8> {
        Some(raw.clamp(0, i64::from(SCALE_MAX)) as u8)
    }

    fn into_answer(value: u8) -> AnswerValue {
        AnswerValue::Scale(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<u8, AnswerValue> {
        match answer {
            AnswerValue::Scale(value) => Ok(value.min(SCALE_MAX)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::testing::Recorder;
    use crate::contract::{Widget, WidgetConfig};

    #[test]
    fn defaults_to_zero() {
        let widget = Widget::new(NumericScale, WidgetConfig::new("How happy?"));
        assert_eq!(*widget.value(), 0);
    }

    #[test]
    fn external_reset_wins_over_interaction() {
        let recorder = Recorder::default();
        let mut widget = Widget::new(
            NumericScale,
            WidgetConfig::new("How happy?").on_answer_change(recorder.callback()),
        );

        assert!(widget.interact(Slide(10)));
        widget.sync(Some(3));

        assert_eq!(*widget.value(), 3);
        assert_eq!(recorder.calls(), vec![AnswerValue::Scale(10)]);
    }

    #[test]
    fn raw_input_is_clamped() {
        let mut widget = Widget::new(NumericScale, WidgetConfig::new("Rate"));
        widget.interact(Slide(42));
        assert_eq!(*widget.value(), SCALE_MAX);
        widget.interact(Slide(-5));
        assert_eq!(*widget.value(), 0);
    }

    #[test]
    fn same_position_is_not_reported() {
        let recorder = Recorder::default();
        let mut widget = Widget::new(
            NumericScale,
            WidgetConfig::new("Rate").on_answer_change(recorder.callback()),
        );
        assert!(!widget.interact(Slide(0)));
        assert!(recorder.calls().is_empty());
    }
}
