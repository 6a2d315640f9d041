//! Paging through submitted responses with a read-only form.
//!
//! Responses can be read one at a time, or one question at a time across
//! every response.

use chrono::{DateTime, Utc};
use slambook_types::{AnswerValue, Answers, Question, QuestionId, QuestionSet};
use thiserror::Error;
use tracing::debug;

use crate::dispatch::WidgetFactory;
use crate::form::{FormSession, FormSessionError, SessionOptions};

/// Format of response timestamps in labels.
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One response as stored by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedResponse {
    pub id: String,
    /// When the response was submitted, if the backend recorded it.
    pub created: Option<DateTime<Utc>>,
    pub answers: Answers,
}

impl SubmittedResponse {
    pub fn new(id: impl Into<String>, answers: Answers) -> Self {
        Self {
            id: id.into(),
            created: None,
            answers,
        }
    }

    /// Set the submission time.
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Label for pickers, e.g. `Response from 2024-03-01 10:30`.
    ///
    /// Falls back to the response id when no time was recorded.
    pub fn label(&self) -> String {
        match self.created {
            Some(created) => format!("Response from {}", created.format(CREATED_FORMAT)),
            None => format!("Response {}", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    #[error("No response at index {index} ({len} responses)")]
    NoSuchResponse { index: usize, len: usize },

    #[error("No question at index {index} ({len} questions)")]
    NoSuchQuestion { index: usize, len: usize },

    #[error(transparent)]
    Session(#[from] FormSessionError),
}

/// Shows submitted responses through a preview-mode form.
///
/// Two cursors are kept: the active response, shown in the form, and the
/// active question, whose answers can be listed across all responses. Both
/// stop at the ends of their lists.
#[derive(Debug)]
pub struct ResponseBrowser {
    session: FormSession,
    responses: Vec<SubmittedResponse>,
    active: Option<usize>,
    question: Option<usize>,
}

impl ResponseBrowser {
    /// Build the browser and show the first response and the first question,
    /// if there are any.
    pub fn new(
        set: QuestionSet,
        factory: &WidgetFactory,
        responses: Vec<SubmittedResponse>,
    ) -> Result<Self, BrowserError> {
        let question = (!set.is_empty()).then_some(0);
        let session = FormSession::new(set, factory, SessionOptions::new().preview_mode(true));
        let mut browser = Self {
            session,
            responses,
            active: None,
            question,
        };
        if !browser.responses.is_empty() {
            browser.select(0)?;
        }
        Ok(browser)
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn responses(&self) -> &[SubmittedResponse] {
        &self.responses
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&SubmittedResponse> {
        self.active.and_then(|index| self.responses.get(index))
    }

    /// Switch to the response at `index` and resync the widgets to it.
    pub fn select(&mut self, index: usize) -> Result<&SubmittedResponse, BrowserError> {
        let response = self
            .responses
            .get(index)
            .ok_or(BrowserError::NoSuchResponse {
                index,
                len: self.responses.len(),
            })?;
        self.session.load_answers(&response.answers)?;
        debug!(index, response = %response.id, "showing response");
        self.active = Some(index);
        Ok(response)
    }

    pub fn has_next(&self) -> bool {
        has_next(self.active, self.responses.len())
    }

    pub fn has_previous(&self) -> bool {
        has_previous(self.active)
    }

    /// Show the following response. On the last one, stays there.
    pub fn next(&mut self) -> Result<&SubmittedResponse, BrowserError> {
        self.select(step_forward(self.active, self.responses.len()))
    }

    /// Show the preceding response. On the first one, stays there.
    pub fn previous(&mut self) -> Result<&SubmittedResponse, BrowserError> {
        self.select(step_back(self.active))
    }

    pub fn active_question_index(&self) -> Option<usize> {
        self.question
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.question
            .and_then(|index| self.session.question_set().questions().get(index))
    }

    /// Switch the question whose answers are listed.
    pub fn select_question(&mut self, index: usize) -> Result<&Question, BrowserError> {
        let questions = self.session.question_set().questions();
        let question = questions.get(index).ok_or(BrowserError::NoSuchQuestion {
            index,
            len: questions.len(),
        })?;
        self.question = Some(index);
        Ok(question)
    }

    pub fn has_next_question(&self) -> bool {
        has_next(self.question, self.session.question_set().len())
    }

    pub fn has_previous_question(&self) -> bool {
        has_previous(self.question)
    }

    /// Move to the following question. On the last one, stays there.
    pub fn next_question(&mut self) -> Result<&Question, BrowserError> {
        let len = self.session.question_set().len();
        self.select_question(step_forward(self.question, len))
    }

    /// Move to the preceding question. On the first one, stays there.
    pub fn previous_question(&mut self) -> Result<&Question, BrowserError> {
        self.select_question(step_back(self.question))
    }

    /// Every response that answered `id`, in response order, with its answer.
    ///
    /// Empty when nobody answered the question.
    pub fn answers_for(&self, id: &QuestionId) -> Vec<(&SubmittedResponse, &AnswerValue)> {
        self.responses
            .iter()
            .filter_map(|response| response.answers.get(id).map(|answer| (response, answer)))
            .collect()
    }
}

fn has_next(active: Option<usize>, len: usize) -> bool {
    active.is_some_and(|index| index + 1 < len)
}

fn has_previous(active: Option<usize>) -> bool {
    active.is_some_and(|index| index > 0)
}

fn step_forward(active: Option<usize>, len: usize) -> usize {
    match active {
        Some(index) if index + 1 < len => index + 1,
        Some(index) => index,
        None => 0,
    }
}

fn step_back(active: Option<usize>) -> usize {
    active.map_or(0, |index| index.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use slambook_types::{AnswerValue, Question, QuestionId, QuestionKind};

    use super::*;

    fn browser(responses: Vec<SubmittedResponse>) -> ResponseBrowser {
        let set = QuestionSet::new(vec![
            Question::new("nick", "Nickname", QuestionKind::ShortText),
            Question::new("mood", "Mood", QuestionKind::NumericScale),
        ]);
        ResponseBrowser::new(set, &WidgetFactory::default(), responses).unwrap()
    }

    fn response(id: &str, nick: &str) -> SubmittedResponse {
        let mut answers = Answers::new();
        answers.insert("nick", nick);
        SubmittedResponse::new(id, answers)
    }

    fn shown_nick(browser: &ResponseBrowser) -> AnswerValue {
        browser
            .session()
            .field(&QuestionId::from("nick"))
            .unwrap()
            .widget()
            .unwrap()
            .value()
    }

    #[test]
    fn starts_on_first_response() {
        let browser = browser(vec![response("r1", "Bunny"), response("r2", "Ace")]);
        assert_eq!(browser.active_index(), Some(0));
        assert_eq!(shown_nick(&browser), "Bunny".into());
        assert!(browser.session().is_preview_mode());
    }

    #[test]
    fn select_resyncs_widgets() {
        let mut browser = browser(vec![response("r1", "Bunny"), response("r2", "Ace")]);
        assert_eq!(browser.select(1).unwrap().id, "r2");
        assert_eq!(shown_nick(&browser), "Ace".into());
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut browser = browser(vec![response("r1", "Bunny")]);
        assert_eq!(
            browser.select(3).unwrap_err(),
            BrowserError::NoSuchResponse { index: 3, len: 1 }
        );
        assert_eq!(browser.active_index(), Some(0));
    }

    #[test]
    fn next_and_previous_stop_at_the_ends() {
        let mut browser = browser(vec![response("r1", "a"), response("r2", "b")]);
        assert!(!browser.has_previous());
        assert!(browser.has_next());
        assert_eq!(browser.previous().unwrap().id, "r1");
        assert_eq!(browser.active_index(), Some(0));

        assert_eq!(browser.next().unwrap().id, "r2");
        assert!(browser.has_previous());
        assert!(!browser.has_next());
        assert_eq!(browser.next().unwrap().id, "r2");
        assert_eq!(shown_nick(&browser), "b".into());

        assert_eq!(browser.previous().unwrap().id, "r1");
        assert_eq!(shown_nick(&browser), "a".into());
    }

    #[test]
    fn questions_are_browsed_with_their_answers() {
        let mut mood = Answers::new();
        mood.insert("mood", 0u8);
        let mut browser = browser(vec![
            response("r1", "Bunny"),
            SubmittedResponse::new("r2", mood),
            response("r3", "Ace"),
        ]);

        assert_eq!(browser.active_question().unwrap().id().as_str(), "nick");
        assert!(!browser.has_previous_question());
        let nicks: Vec<_> = browser
            .answers_for(&QuestionId::from("nick"))
            .into_iter()
            .map(|(response, answer)| (response.id.as_str(), answer.clone()))
            .collect();
        assert_eq!(
            nicks,
            [("r1", AnswerValue::from("Bunny")), ("r3", AnswerValue::from("Ace"))]
        );

        assert_eq!(browser.next_question().unwrap().id().as_str(), "mood");
        assert!(!browser.has_next_question());
        assert_eq!(browser.next_question().unwrap().id().as_str(), "mood");
        let moods = browser.answers_for(&QuestionId::from("mood"));
        assert_eq!(moods.len(), 1);
        assert_eq!(moods[0].0.id, "r2");

        assert_eq!(browser.previous_question().unwrap().id().as_str(), "nick");
        assert_eq!(
            browser.select_question(5).unwrap_err(),
            BrowserError::NoSuchQuestion { index: 5, len: 2 }
        );
    }

    #[test]
    fn unanswered_question_lists_nothing() {
        let browser = browser(vec![response("r1", "Bunny")]);
        assert!(browser.answers_for(&QuestionId::from("mood")).is_empty());
    }

    #[test]
    fn labels_use_the_submission_time() {
        let plain = response("r1", "Bunny");
        assert_eq!(plain.label(), "Response r1");

        let dated = plain.created_at("2024-03-01T10:30:00Z".parse().unwrap());
        assert_eq!(dated.label(), "Response from 2024-03-01 10:30");
    }

    #[test]
    fn empty_browser() {
        let mut browser = browser(Vec::new());
        assert!(browser.active().is_none());
        assert!(!browser.has_next() && !browser.has_previous());
        assert!(matches!(
            browser.next(),
            Err(BrowserError::NoSuchResponse { len: 0, .. })
        ));
    }
}
