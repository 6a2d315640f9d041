use crate::{Answers, QuestionSet};

/// Trait for backend implementations that collect answers to a question set.
///
/// Backends receive a `QuestionSet` and return `Answers`. They decide how to
/// present the questions (GUI form, scripted playback, etc.).
pub trait FormBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Collect answers for a question set.
    ///
    /// # Arguments
    /// * `set` - The questions to answer
    /// * `initial` - Answers to pre-populate the widgets with (may be empty)
    ///
    /// # Returns
    /// * `Ok(answers)` once the user submits and every required question is answered
    /// * `Err` on cancellation or backend failure
    fn collect(&self, set: &QuestionSet, initial: &Answers) -> Result<Answers, Self::Error>;
}

/// Collaborator that stores a file answer and returns the URL it can be fetched from.
///
/// Submission uploads file answers one by one before sending the answer map.
pub trait FileUploader {
    fn upload(&mut self, file: &crate::FileHandle) -> anyhow::Result<String>;
}

/// Collaborator that fetches a stored file answer by the name the backend keeps.
///
/// Used when decoding stored responses for display.
pub trait FileFetcher {
    fn fetch(&mut self, name: &str) -> anyhow::Result<crate::FileHandle>;
}
