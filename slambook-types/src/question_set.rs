use serde::{Deserialize, Serialize};

use crate::{Question, QuestionId};

/// The top-level structure: an ordered collection of questions shared under one link.
///
/// Questions are kept sorted by their `sequence`. The set is presentation-agnostic;
/// it can be rendered as a fill-in form, as a read-only response view, or as an
/// authoring preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawQuestionSet")]
pub struct QuestionSet {
    /// Title of the slambook.
    #[serde(rename = "slamtitle")]
    pub title: String,

    /// All questions, in display order.
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct RawQuestionSet {
    #[serde(rename = "slamtitle", alias = "title", default)]
    title: String,
    #[serde(default)]
    questions: Vec<Question>,
}

impl From<RawQuestionSet> for QuestionSet {
    fn from(raw: RawQuestionSet) -> Self {
        Self::new(raw.questions).with_title(raw.title)
    }
}

impl QuestionSet {
    /// Create a new question set, ordering the questions by sequence.
    ///
    /// The sort is stable, so questions sharing a sequence keep their given order.
    pub fn new(mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(Question::sequence);
        Self {
            title: String::new(),
            questions,
        }
    }

    /// Create an empty question set.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            questions: Vec::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id.
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Position of a question in display order.
    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Check if the set has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Append a question at the end, assigning the next sequence number.
    pub fn push(&mut self, mut question: Question) {
        question.set_sequence(self.questions.len() as u32);
        self.questions.push(question);
    }

    /// Remove a question and close the gap in the sequence.
    ///
    /// Returns the removed question and the `(id, sequence)` pairs of every
    /// remaining question, which is what the backend expects to persist.
    pub fn remove(&mut self, id: &QuestionId) -> Option<(Question, Vec<(QuestionId, u32)>)> {
        let index = self.position(id)?;
        let removed = self.questions.remove(index);
        Some((removed, self.resequence()))
    }

    /// Move the question at `from` to position `to` (drag-and-drop reorder).
    ///
    /// Out-of-range positions leave the set untouched and return `None`.
    pub fn move_question(&mut self, from: usize, to: usize) -> Option<Vec<(QuestionId, u32)>> {
        if from >= self.questions.len() || to >= self.questions.len() {
            return None;
        }
        let question = self.questions.remove(from);
        self.questions.insert(to, question);
        Some(self.resequence())
    }

    fn resequence(&mut self) -> Vec<(QuestionId, u32)> {
        self.questions
            .iter_mut()
            .enumerate()
            .map(|(index, q)| {
                q.set_sequence(index as u32);
                (q.id().clone(), index as u32)
            })
            .collect()
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self::empty()
    }
}
