//! Egui backend implementation for the FormBackend trait.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eframe::egui;
use slambook::{
    Answers, BrowserError, FormBackend, FormSession, PreviewRegistry, QuestionId, QuestionSet,
    ResponseBrowser, SessionOptions, SubmittedResponse, WidgetFactory,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::render::{FieldUi, render_answer, render_session};

/// Error type for the Egui backend.
#[derive(Debug, Error)]
pub enum EguiError {
    /// User cancelled the form (closed the window).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An error occurred in the egui/eframe backend.
    #[error("Egui error: {0}")]
    EguiError(String),

    /// The responses could not be shown.
    #[error(transparent)]
    Browser(#[from] BrowserError),
}

/// Builder/configuration for the Egui backend.
#[derive(Debug, Clone)]
pub struct EguiBackend {
    /// Window title.
    title: String,
    /// Window size [width, height].
    window_size: [f32; 2],
    /// Show the answers read-only.
    preview_mode: bool,
    factory: WidgetFactory,
}

impl Default for EguiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiBackend {
    /// Create a new Egui backend with default settings.
    pub fn new() -> Self {
        Self {
            title: "Slambook".to_string(),
            window_size: [500.0, 600.0],
            preview_mode: false,
            factory: WidgetFactory::default(),
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size.
    pub fn with_window_size(mut self, size: [f32; 2]) -> Self {
        self.window_size = size;
        self
    }

    /// Render every widget inert. The window then only offers "Close", and
    /// `collect` hands back the answers it was given.
    pub fn with_preview_mode(mut self, preview_mode: bool) -> Self {
        self.preview_mode = preview_mode;
        self
    }

    fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size(self.window_size),
            ..Default::default()
        }
    }

    /// Page through submitted responses in a read-only window, one response
    /// or one question at a time.
    pub fn browse(
        &self,
        set: &QuestionSet,
        responses: Vec<SubmittedResponse>,
    ) -> Result<(), EguiError> {
        let browser = ResponseBrowser::new(set.clone(), &self.factory, responses)?;
        let state = Arc::new(Mutex::new(BrowseState {
            browser,
            previews: self.factory.previews().clone(),
            view: FieldUi::default(),
            tab: Tab::ByQuestion,
            error: None,
        }));

        let app_state = Arc::clone(&state);
        eframe::run_native(
            &self.title,
            self.native_options(),
            Box::new(move |_cc| Ok(Box::new(BrowseApp { state: app_state }) as Box<dyn eframe::App>)),
        )
        .map_err(|e| EguiError::EguiError(e.to_string()))
    }
}

fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The state of a fill-in window.
struct FormState {
    title: String,
    session: FormSession,
    previews: PreviewRegistry,
    view: FieldUi,
    /// Required questions still unanswered at the last submit attempt.
    missing: Vec<QuestionId>,
    error: Option<String>,
    /// Whether the form has been submitted.
    submitted: bool,
    /// Whether the window was closed (cancelled).
    cancelled: bool,
}

impl FormState {
    fn submit(&mut self) -> bool {
        if self.session.is_preview_mode() {
            return true;
        }
        match self.session.check_required() {
            Ok(()) => {
                self.missing.clear();
                self.error = None;
                true
            }
            Err(err) => {
                self.missing = self
                    .session
                    .unanswered_required()
                    .into_iter()
                    .map(|question| question.id().clone())
                    .collect();
                self.error = Some(err.to_string());
                false
            }
        }
    }
}

struct FormApp {
    state: Arc<Mutex<FormState>>,
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut guard = lock(&self.state);
            let state = &mut *guard;

            if !state.title.is_empty() {
                ui.heading(&state.title);
                ui.separator();
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                let interactions = render_session(
                    ui,
                    &state.session,
                    &state.previews,
                    &mut state.view,
                    &state.missing,
                );
                for (id, interaction) in interactions {
                    match state.session.interact(&id, interaction) {
                        Ok(true) => state.missing.retain(|missing| missing != &id),
                        Ok(false) => {}
                        Err(err) => warn!("interaction dropped: {err}"),
                    }
                }

                ui.separator();

                ui.horizontal(|ui| {
                    let label = if state.session.is_preview_mode() {
                        "Close"
                    } else {
                        "Submit"
                    };
                    if ui.button(label).clicked() && state.submit() {
                        state.submitted = true;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }

                    if !state.session.is_preview_mode() && ui.button("Cancel").clicked() {
                        state.cancelled = true;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }

                    if let Some(error) = &state.error {
                        ui.colored_label(egui::Color32::RED, error);
                    }
                });
            });
        });
    }
}

impl FormBackend for EguiBackend {
    type Error = EguiError;

    fn collect(&self, set: &QuestionSet, initial: &Answers) -> Result<Answers, Self::Error> {
        let session = FormSession::new(
            set.clone(),
            &self.factory,
            SessionOptions::new()
                .preview_mode(self.preview_mode)
                .initial_answers(initial.clone()),
        );
        let state = Arc::new(Mutex::new(FormState {
            title: set.title.clone(),
            session,
            previews: self.factory.previews().clone(),
            view: FieldUi::default(),
            missing: Vec::new(),
            error: None,
            submitted: false,
            cancelled: false,
        }));

        // eframe::run_native blocks until the window is closed
        let app_state = Arc::clone(&state);
        eframe::run_native(
            &self.title,
            self.native_options(),
            Box::new(move |_cc| Ok(Box::new(FormApp { state: app_state }) as Box<dyn eframe::App>)),
        )
        .map_err(|e| EguiError::EguiError(e.to_string()))?;

        let state = lock(&state);
        if state.cancelled || !state.submitted {
            return Err(EguiError::Cancelled);
        }
        let answers = state.session.answers();
        debug!(answers = answers.len(), "form submitted");
        Ok(answers)
    }
}

/// The state of a response browsing window.
struct BrowseState {
    browser: ResponseBrowser,
    previews: PreviewRegistry,
    view: FieldUi,
    tab: Tab,
    error: Option<String>,
}

impl BrowseState {
    fn switch(&mut self, switch: Switch) {
        let result = match (self.tab, switch) {
            (Tab::ByResponse, Switch::Previous) => self.browser.previous().map(drop),
            (Tab::ByResponse, Switch::Next) => self.browser.next().map(drop),
            (Tab::ByResponse, Switch::To(index)) => self.browser.select(index).map(drop),
            (Tab::ByQuestion, Switch::Previous) => self.browser.previous_question().map(drop),
            (Tab::ByQuestion, Switch::Next) => self.browser.next_question().map(drop),
            (Tab::ByQuestion, Switch::To(index)) => self.browser.select_question(index).map(drop),
        };
        self.error = result.err().map(|err| err.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    ByQuestion,
    ByResponse,
}

enum Switch {
    Previous,
    Next,
    To(usize),
}

struct BrowseApp {
    state: Arc<Mutex<BrowseState>>,
}

impl eframe::App for BrowseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut guard = lock(&self.state);
        let state = &mut *guard;

        egui::TopBottomPanel::top("responses").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut state.tab, Tab::ByQuestion, "By Question");
                ui.selectable_value(&mut state.tab, Tab::ByResponse, "By Response");
            });
            ui.separator();
            if let Some(switch) = navigation(ui, state) {
                state.switch(switch);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &state.error {
                ui.colored_label(egui::Color32::RED, error);
            }
            match state.tab {
                Tab::ByResponse => {
                    let set = state.browser.session().question_set();
                    if !set.title.is_empty() {
                        ui.heading(&set.title);
                    }
                    let Some(response) = state.browser.active() else {
                        return;
                    };
                    ui.label(response.label());
                    ui.separator();
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        // Widgets are in preview mode, so nothing is reported.
                        render_session(
                            ui,
                            state.browser.session(),
                            &state.previews,
                            &mut state.view,
                            &[],
                        );
                    });
                }
                Tab::ByQuestion => {
                    let Some(question) = state.browser.active_question() else {
                        return;
                    };
                    ui.heading(question.text());
                    ui.separator();
                    let answers = state.browser.answers_for(question.id());
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if answers.is_empty() {
                            ui.label(egui::RichText::new("No answers yet").italics());
                        }
                        for (response, answer) in answers {
                            ui.weak(response.label());
                            let key = format!("{}/{}", response.id, question.id());
                            render_answer(ui, &key, question, answer, &mut state.view);
                            ui.add_space(8.0);
                        }
                    });
                }
            }
        });
    }
}

/// Previous/next buttons around a picker for the active tab.
fn navigation(ui: &mut egui::Ui, state: &BrowseState) -> Option<Switch> {
    let browser = &state.browser;
    let (labels, active, has_previous, has_next, empty) = match state.tab {
        Tab::ByResponse => (
            browser
                .responses()
                .iter()
                .map(|response| response.label())
                .collect::<Vec<_>>(),
            browser.active_index(),
            browser.has_previous(),
            browser.has_next(),
            "No responses yet",
        ),
        Tab::ByQuestion => (
            browser
                .session()
                .question_set()
                .questions()
                .iter()
                .map(|question| question.text().to_string())
                .collect::<Vec<_>>(),
            browser.active_question_index(),
            browser.has_previous_question(),
            browser.has_next_question(),
            "No questions found",
        ),
    };
    if labels.is_empty() {
        ui.weak(empty);
        return None;
    }

    let mut switch = None;
    ui.horizontal(|ui| {
        if ui.add_enabled(has_previous, egui::Button::new("◀")).clicked() {
            switch = Some(Switch::Previous);
        }
        let selected = active
            .and_then(|index| labels.get(index))
            .cloned()
            .unwrap_or_default();
        egui::ComboBox::from_id_salt(("browse", state.tab == Tab::ByQuestion))
            .selected_text(selected)
            .width(320.0)
            .show_ui(ui, |ui| {
                for (index, label) in labels.iter().enumerate() {
                    if ui.selectable_label(active == Some(index), label.as_str()).clicked() {
                        switch = Some(Switch::To(index));
                    }
                }
            });
        if ui.add_enabled(has_next, egui::Button::new("▶")).clicked() {
            switch = Some(Switch::Next);
        }
    });
    switch
}
