//! Scripted backend for filling forms without user interaction.
//!
//! `ScriptedBackend` replays a list of interactions against a [`FormSession`],
//! the same way a person clicking through the rendered form would, and then
//! runs the submit-time required check.
//!
//! # Example
//!
//! ```rust
//! use slambook::{FormBackend, Question, QuestionKind, QuestionSet, ScriptedBackend, Answers};
//!
//! let set = QuestionSet::new(vec![
//!     Question::new("nick", "Nickname?", QuestionKind::ShortText).required(),
//!     Question::new("mood", "Mood today?", QuestionKind::NumericScale),
//! ]);
//!
//! let answers = ScriptedBackend::new()
//!     .edit("nick", "Bunny")
//!     .slide("mood", 8)
//!     .collect(&set, &Answers::new())
//!     .unwrap();
//!
//! assert_eq!(answers.get_text(&"nick".into()).unwrap(), "Bunny");
//! assert_eq!(answers.get_scale(&"mood".into()).unwrap(), 8);
//! ```

use slambook_types::{Answers, FileHandle, FormBackend, QuestionId, QuestionSet, RequiredError};

use crate::dispatch::{Interaction, WidgetFactory};
use crate::form::{FormSession, FormSessionError, SessionOptions};

/// A backend that plays pre-recorded interactions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    steps: Vec<(QuestionId, Interaction)>,
    factory: WidgetFactory,
}

/// Error type for ScriptedBackend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Step {index} failed")]
    Step {
        index: usize,
        #[source]
        source: FormSessionError,
    },

    #[error(transparent)]
    Required(#[from] RequiredError),
}

impl ScriptedBackend {
    /// Create a backend with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `factory` to build widgets, e.g. to inspect its preview registry.
    pub fn with_factory(mut self, factory: WidgetFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Append an arbitrary interaction.
    pub fn step(mut self, id: impl Into<QuestionId>, interaction: Interaction) -> Self {
        self.steps.push((id.into(), interaction));
        self
    }

    /// Choose an option of a single-choice question.
    pub fn select(self, id: impl Into<QuestionId>, option: impl Into<String>) -> Self {
        self.step(id, Interaction::Select(option.into()))
    }

    /// Check or uncheck an option of a multi-choice question.
    pub fn toggle(self, id: impl Into<QuestionId>, option: impl Into<String>) -> Self {
        self.step(id, Interaction::Toggle(option.into()))
    }

    /// Type into a text or date input, replacing its content.
    pub fn edit(self, id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        self.step(id, Interaction::Edit(text.into()))
    }

    pub fn slide(self, id: impl Into<QuestionId>, position: i64) -> Self {
        self.step(id, Interaction::Slide(position))
    }

    pub fn pick_file(self, id: impl Into<QuestionId>, file: FileHandle) -> Self {
        self.step(id, Interaction::PickFile(file))
    }

    pub fn clear_file(self, id: impl Into<QuestionId>) -> Self {
        self.step(id, Interaction::ClearFile)
    }

    /// Play the script into a fresh session and return it without submitting.
    pub fn play(&self, set: &QuestionSet, initial: &Answers) -> Result<FormSession, ScriptError> {
        let mut session = FormSession::new(
            set.clone(),
            &self.factory,
            SessionOptions::new().initial_answers(initial.clone()),
        );
        for (index, (id, interaction)) in self.steps.iter().enumerate() {
            session
                .interact(id, interaction.clone())
                .map_err(|source| ScriptError::Step { index, source })?;
        }
        Ok(session)
    }
}

impl FormBackend for ScriptedBackend {
    type Error = ScriptError;

    fn collect(&self, set: &QuestionSet, initial: &Answers) -> Result<Answers, Self::Error> {
        let session = self.play(set, initial)?;
        session.check_required()?;
        Ok(session.answers())
    }
}
