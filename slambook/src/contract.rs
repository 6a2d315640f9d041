//! The contract every question widget follows.
//!
//! A widget never owns the answer. The value handed in from outside is the
//! source of truth; the widget keeps a staging copy for rendering, which is
//! overwritten whenever a new external value is observed. User edits update
//! the staging copy and are reported through the answer callback in the same
//! call.

use std::fmt;

use slambook_types::{AnswerValue, QuestionKind};
use tracing::trace;

/// Receives every committed answer, synchronously and unbatched.
pub type AnswerCallback = Box<dyn FnMut(AnswerValue) + Send>;

/// Behaviour of one question variant.
///
/// Implementors describe the answer shape and how an interaction turns the
/// staged value into a new one. [`Widget`] wraps them with the shared rules
/// (preview mode, resynchronization, reporting).
pub trait QuestionWidget {
    /// The shape of answers to this question.
    type Value: Clone + PartialEq + fmt::Debug;

    /// What the user can do to the control.
    type Event: fmt::Debug;

    /// The question kind this variant renders.
    const KIND: QuestionKind;

    /// The value a fresh form starts with.
    fn empty() -> Self::Value;

    /// Compute the value after `event`, or `None` if the control rejects it.
    fn apply(&self, staged: &Self::Value, event: Self::Event) -> Option<Self::Value>;

    /// Called whenever the staged value is replaced, by interaction or resync.
    fn restaged(&mut self, _value: &Self::Value) {}

    fn into_answer(value: Self::Value) -> AnswerValue;

    /// Extract the typed value, handing the answer back if the shape is wrong.
    fn from_answer(answer: AnswerValue) -> Result<Self::Value, AnswerValue>;
}

/// Construction parameters shared by all variants.
pub struct WidgetConfig<T> {
    question_text: String,
    required: bool,
    preview: bool,
    on_answer_change: AnswerCallback,
    current_value: Option<T>,
}

impl<T> WidgetConfig<T> {
    /// Start a config for the given prompt. The callback defaults to a no-op.
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            required: false,
            preview: false,
            on_answer_change: Box::new(|_| {}),
            current_value: None,
        }
    }

    /// Show the required marker.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Render the widget inert.
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn on_answer_change(mut self, callback: impl FnMut(AnswerValue) + Send + 'static) -> Self {
        self.on_answer_change = Box::new(callback);
        self
    }

    /// The externally held answer to start from.
    pub fn value(mut self, value: T) -> Self {
        self.current_value = Some(value);
        self
    }

    /// Like [`WidgetConfig::value`], with `None` meaning "use the empty sentinel".
    pub fn value_opt(mut self, value: Option<T>) -> Self {
        self.current_value = value;
        self
    }

    /// Convert the current value, keeping everything else.
    pub fn try_map_value<U, E>(
        self,
        f: impl FnOnce(T) -> Result<U, E>,
    ) -> Result<WidgetConfig<U>, E> {
        let current_value = self.current_value.map(f).transpose()?;
        Ok(WidgetConfig {
            question_text: self.question_text,
            required: self.required,
            preview: self.preview,
            on_answer_change: self.on_answer_change,
            current_value,
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for WidgetConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("question_text", &self.question_text)
            .field("required", &self.required)
            .field("preview", &self.preview)
            .field("current_value", &self.current_value)
            .finish_non_exhaustive()
    }
}

/// A question widget: one variant plus the shared staging and reporting rules.
pub struct Widget<V: QuestionWidget> {
    question_text: String,
    required: bool,
    preview: bool,
    variant: V,
    staged: V::Value,
    /// The last external value seen, to resync once per change.
    observed: V::Value,
    on_answer_change: AnswerCallback,
}

impl<V: QuestionWidget> Widget<V> {
    /// Create a widget. A missing current value starts it at the empty sentinel.
    pub fn new(mut variant: V, config: WidgetConfig<V::Value>) -> Self {
        let staged = config.current_value.unwrap_or_else(V::empty);
        variant.restaged(&staged);
        Self {
            question_text: config.question_text,
            required: config.required,
            preview: config.preview,
            variant,
            observed: staged.clone(),
            staged,
            on_answer_change: config.on_answer_change,
        }
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn set_preview(&mut self, preview: bool) {
        self.preview = preview;
    }

    /// The displayed value.
    pub fn value(&self) -> &V::Value {
        &self.staged
    }

    /// The variant, for variant-specific accessors.
    pub fn variant(&self) -> &V {
        &self.variant
    }

    /// Handle a user interaction.
    ///
    /// Returns `true` if the value changed and the callback was invoked.
    /// Preview mode, rejected events, and events that leave the value as it
    /// is all return `false` without calling back.
    pub fn interact(&mut self, event: V::Event) -> bool {
        if self.preview {
            trace!(kind = %V::KIND, ?event, "ignoring interaction in preview mode");
            return false;
        }
        let Some(next) = self.variant.apply(&self.staged, event) else {
            trace!(kind = %V::KIND, "interaction rejected by control");
            return false;
        };
        if next == self.staged {
            return false;
        }
        self.staged = next;
        self.variant.restaged(&self.staged);
        (self.on_answer_change)(V::into_answer(self.staged.clone()));
        true
    }

    /// Observe the externally held value. `None` stands for the empty sentinel.
    ///
    /// The staging buffer is overwritten only when the external value differs
    /// from the one observed last time. Never invokes the callback.
    pub fn sync(&mut self, external: Option<V::Value>) {
        let external = external.unwrap_or_else(V::empty);
        if external == self.observed {
            return;
        }
        self.observed = external.clone();
        if external != self.staged {
            self.staged = external;
            self.variant.restaged(&self.staged);
        }
    }
}

impl<V> fmt::Debug for Widget<V>
where
    V: QuestionWidget + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("question_text", &self.question_text)
            .field("required", &self.required)
            .field("preview", &self.preview)
            .field("variant", &self.variant)
            .field("staged", &self.staged)
            .finish_non_exhaustive()
    }
}
