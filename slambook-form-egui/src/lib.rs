//! # slambook-form-egui
//!
//! An egui form backend for slambook that renders question sets as GUI forms.
//!
//! This backend uses the `eframe` and `egui` crates to provide a native
//! desktop form interface. All questions are displayed at once and can be
//! answered in any order. Signature uploads show a preview of the chosen image.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slambook::{Answers, FormBackend, Question, QuestionKind, QuestionSet};
//! use slambook_form_egui::EguiBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let set = QuestionSet::new(vec![
//!         Question::new("nick", "What should we call you?", QuestionKind::ShortText).required(),
//!         Question::new("mood", "How much will you miss school?", QuestionKind::NumericScale),
//!     ])
//!     .with_title("Farewell");
//!
//!     let backend = EguiBackend::new()
//!         .with_title("Farewell slambook")
//!         .with_window_size([400.0, 300.0]);
//!
//!     let answers = backend.collect(&set, &Answers::new())?;
//!     println!("{answers:?}");
//!     Ok(())
//! }
//! ```
//!
//! Submitted responses can be paged through with [`EguiBackend::browse`].

mod backend;
mod render;

pub use backend::{EguiBackend, EguiError};
