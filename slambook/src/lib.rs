//! # slambook
//!
//! Question widgets for slambooks: the per-question controls of a shared
//! questionnaire, and the session that collects their answers. Backend-agnostic.
//!
//! Every question in a [`QuestionSet`] carries a type tag. The
//! [`WidgetFactory`] turns each question into the matching widget, and a
//! [`FormSession`] wires the widgets to one answer map keyed by question id.
//!
//! ## Usage
//!
//! ```rust
//! use slambook::{
//!     FormSession, Interaction, Question, QuestionKind, QuestionSet, SessionOptions,
//!     WidgetFactory,
//! };
//!
//! let set = QuestionSet::new(vec![
//!     Question::new("pets", "Cats or dogs?", QuestionKind::MultiChoice)
//!         .with_options(["Cats", "Dogs"])
//!         .with_max_selection(1),
//! ]);
//!
//! let mut form = FormSession::new(set, &WidgetFactory::default(), SessionOptions::new());
//! form.interact(&"pets".into(), Interaction::Toggle("Dogs".into())).unwrap();
//! // Cap of one: the second selection is ignored.
//! form.interact(&"pets".into(), Interaction::Toggle("Cats".into())).unwrap();
//!
//! assert_eq!(form.answers().get_choices(&"pets".into()).unwrap(), ["Dogs"]);
//! ```
//!
//! ## Widget rules
//!
//! - The value passed in from outside is the source of truth. A widget keeps
//!   a staging copy and overwrites it when it observes a new external value.
//! - User edits are reported synchronously through the answer callback.
//! - In preview mode widgets render their value but ignore all input.
//!
//! ## Backends
//!
//! Backends implement [`FormBackend`]:
//! - `slambook-form-egui` - GUI form via egui
//! - [`ScriptedBackend`] - replays interactions, for tests

pub use slambook_types::*;

mod contract;
pub use contract::{AnswerCallback, QuestionWidget, Widget, WidgetConfig};

pub mod variants;

mod preview;
pub use preview::{PreviewRegistry, PreviewUrl};

mod dispatch;
pub use dispatch::{AnyWidget, Interaction, WidgetError, WidgetFactory};

mod form;
pub use form::{FormField, FormSession, FormSessionError, SessionOptions};

mod browser;
pub use browser::{BrowserError, ResponseBrowser, SubmittedResponse};

mod stored;
pub use stored::{StoredAnswer, StoredResponse, decode_responses};

mod submission;
pub use submission::{SubmitError, Submission, prepare_submission};

mod test_backend;
pub use test_backend::{ScriptError, ScriptedBackend};
