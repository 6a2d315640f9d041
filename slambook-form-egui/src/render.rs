//! Drawing widgets with egui.
//!
//! Rendering never mutates the session: each control reports what the user
//! did as an [`Interaction`], and the caller routes it once the frame is laid
//! out. The next frame then shows the resynchronized value.

use std::collections::{HashMap, HashSet};

use eframe::egui;
use slambook::{
    AnswerValue, AnyWidget, FileHandle, FormSession, Interaction, PreviewRegistry, PreviewUrl,
    Question, QuestionId, QuestionKind, SCALE_MAX, WidgetError, parse_date,
};
use tracing::warn;

/// Per-window UI state that has no place in the widgets themselves.
#[derive(Default)]
pub(crate) struct FieldUi {
    /// Date text being typed, with the committed value it started from.
    dates: HashMap<QuestionId, (String, String)>,
    /// Path typed into a file field.
    paths: HashMap<QuestionId, String>,
    /// Last file read failure per question.
    notes: HashMap<QuestionId, String>,
    /// Decoded signature previews by preview id; `None` if decoding failed.
    textures: HashMap<u64, Option<egui::TextureHandle>>,
    /// Decoded images of listed answers, by caller key.
    answer_textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl FieldUi {
    #[cfg(test)]
    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

/// Format a prompt as a label, adding a colon only if the prompt doesn't end with punctuation.
pub(crate) fn format_label(prompt: &str, required: bool) -> String {
    let trimmed = prompt.trim();
    let mut label = match trimmed.chars().last() {
        None => String::new(),
        Some(':' | '?' | '!' | '.') => trimmed.to_string(),
        Some(_) => format!("{trimmed}:"),
    };
    if required {
        label.push_str(" *");
    }
    label
}

/// Draw every field of `session` and return the interactions of this frame.
///
/// Questions listed in `missing` get a reminder under their control.
pub(crate) fn render_session(
    ui: &mut egui::Ui,
    session: &FormSession,
    previews: &PreviewRegistry,
    view: &mut FieldUi,
    missing: &[QuestionId],
) -> Vec<(QuestionId, Interaction)> {
    let mut interactions = Vec::new();
    let mut shown_previews = HashSet::new();

    for field in session.fields() {
        let question = field.question();
        let id = question.id();
        ui.label(format_label(question.text(), question.is_required()));

        match field.widget() {
            Ok(widget) => {
                if let Some(url) = widget.preview_url() {
                    shown_previews.insert(url.id());
                }
                let interaction = ui
                    .add_enabled_ui(!widget.is_preview(), |ui| {
                        render_widget(ui, id, widget, previews, view)
                    })
                    .inner;
                if let Some(interaction) = interaction {
                    interactions.push((id.clone(), interaction));
                }
            }
            Err(WidgetError::Unsupported(err)) => {
                ui.colored_label(egui::Color32::RED, err.to_string());
            }
            Err(err) => {
                ui.colored_label(egui::Color32::RED, format!("⚠ {err}"));
            }
        }

        if missing.contains(id) {
            ui.colored_label(egui::Color32::RED, "⚠ This question is required");
        }
        ui.add_space(8.0);
    }

    view.textures.retain(|id, _| shown_previews.contains(id));
    interactions
}

fn render_widget(
    ui: &mut egui::Ui,
    id: &QuestionId,
    widget: &AnyWidget,
    previews: &PreviewRegistry,
    view: &mut FieldUi,
) -> Option<Interaction> {
    let value = widget.value();
    match widget.kind() {
        QuestionKind::SingleChoice => render_single_choice(ui, widget, &value),
        QuestionKind::MultiChoice => render_multi_choice(ui, widget, &value),
        QuestionKind::ShortText => {
            let mut text = value.as_str().unwrap_or_default().to_string();
            ui.add(egui::TextEdit::singleline(&mut text).desired_width(f32::INFINITY))
                .changed()
                .then_some(Interaction::Edit(text))
        }
        QuestionKind::LongText => {
            let mut text = value.as_str().unwrap_or_default().to_string();
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .desired_width(f32::INFINITY)
                    .desired_rows(3),
            )
            .changed()
            .then_some(Interaction::Edit(text))
        }
        QuestionKind::Date => render_date(ui, id, &value, view),
        QuestionKind::NumericScale => {
            let mut position = i64::from(value.as_scale().unwrap_or_default());
            ui.add(egui::Slider::new(&mut position, 0..=i64::from(SCALE_MAX)))
                .changed()
                .then_some(Interaction::Slide(position))
        }
        QuestionKind::ImageFile => render_file(ui, id, &value, view),
        QuestionKind::SignatureFile => {
            let interaction = render_file(ui, id, &value, view);
            if let Some(url) = widget.preview_url() {
                render_signature_preview(ui, previews, url, view);
            }
            interaction
        }
    }
}

fn render_single_choice(
    ui: &mut egui::Ui,
    widget: &AnyWidget,
    value: &AnswerValue,
) -> Option<Interaction> {
    let selected = value.as_str();
    let mut interaction = None;
    for option in widget.options() {
        if ui.radio(selected == Some(option.as_str()), option).clicked() {
            interaction = Some(Interaction::Select(option.clone()));
        }
    }
    interaction
}

fn render_multi_choice(
    ui: &mut egui::Ui,
    widget: &AnyWidget,
    value: &AnswerValue,
) -> Option<Interaction> {
    let chosen = value.as_choices().unwrap_or_default();
    let options = widget.options();
    let cap = widget.selection_cap().unwrap_or(options.len());
    if cap < options.len() {
        ui.weak(format!("Choose up to {cap}"));
    }

    let mut interaction = None;
    for option in options {
        let mut checked = chosen.contains(option);
        let enabled = checked || chosen.len() < cap;
        if ui
            .add_enabled(enabled, egui::Checkbox::new(&mut checked, option))
            .changed()
        {
            interaction = Some(Interaction::Toggle(option.clone()));
        }
    }
    interaction
}

fn render_date(
    ui: &mut egui::Ui,
    id: &QuestionId,
    value: &AnswerValue,
    view: &mut FieldUi,
) -> Option<Interaction> {
    let committed = value.as_str().unwrap_or_default();
    let (seen, buffer) = view
        .dates
        .entry(id.clone())
        .or_insert_with(|| (committed.to_string(), committed.to_string()));
    // A new committed value replaces whatever was being typed.
    if seen.as_str() != committed {
        *seen = committed.to_string();
        *buffer = committed.to_string();
    }

    let changed = ui
        .add(egui::TextEdit::singleline(buffer).hint_text("YYYY-MM-DD"))
        .changed();
    let valid = buffer.is_empty() || parse_date(buffer).is_some();
    if !valid {
        ui.colored_label(egui::Color32::RED, "⚠ Use the format YYYY-MM-DD");
    }
    (changed && valid).then(|| Interaction::Edit(buffer.clone()))
}

fn render_file(
    ui: &mut egui::Ui,
    id: &QuestionId,
    value: &AnswerValue,
    view: &mut FieldUi,
) -> Option<Interaction> {
    let current = value.as_file();
    match current {
        Some(file) => ui.label(format!("{} ({} bytes)", file.name(), file.len())),
        None => ui.weak("No file chosen"),
    };

    let mut interaction = None;
    ui.horizontal(|ui| {
        let path = view.paths.entry(id.clone()).or_default();
        ui.add(egui::TextEdit::singleline(path).hint_text("Path to file"));
        if ui
            .add_enabled(!path.trim().is_empty(), egui::Button::new("Attach"))
            .clicked()
        {
            match read_file(path.trim()) {
                Ok(file) => {
                    view.notes.remove(id);
                    interaction = Some(Interaction::PickFile(file));
                }
                Err(err) => {
                    warn!(question = %id, path = %path, "could not read file: {err}");
                    view.notes.insert(id.clone(), format!("Could not read {path}: {err}"));
                }
            }
        }
        if ui
            .add_enabled(current.is_some(), egui::Button::new("Clear"))
            .clicked()
        {
            interaction = Some(Interaction::ClearFile);
        }
    });
    if let Some(note) = view.notes.get(id) {
        ui.colored_label(egui::Color32::RED, format!("⚠ {note}"));
    }
    interaction
}

fn read_file(path: &str) -> std::io::Result<FileHandle> {
    let bytes = std::fs::read(path)?;
    let name = std::path::Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(FileHandle::new(name, bytes))
}

fn render_signature_preview(
    ui: &mut egui::Ui,
    previews: &PreviewRegistry,
    url: &PreviewUrl,
    view: &mut FieldUi,
) {
    let texture = view
        .textures
        .entry(url.id())
        .or_insert_with(|| decode_preview(ui.ctx(), previews, url));
    match texture {
        Some(texture) => {
            ui.add(
                egui::Image::new(egui::load::SizedTexture::from_handle(texture)).max_height(120.0),
            );
        }
        None => {
            ui.weak("Preview unavailable");
        }
    }
}

fn decode_preview(
    ctx: &egui::Context,
    previews: &PreviewRegistry,
    url: &PreviewUrl,
) -> Option<egui::TextureHandle> {
    let file = previews.resolve(url.as_str())?;
    decode_image(ctx, url.as_str(), &file)
}

fn decode_image(ctx: &egui::Context, name: &str, file: &FileHandle) -> Option<egui::TextureHandle> {
    let decoded = image::load_from_memory(file.bytes())
        .inspect_err(|err| warn!(name = file.name(), "could not decode image: {err}"))
        .ok()?
        .to_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    let color = egui::ColorImage::from_rgba_unmultiplied(size, decoded.as_raw());
    Some(ctx.load_texture(name, color, egui::TextureOptions::default()))
}

/// Draw one answer read-only, as the by-question view lists them.
///
/// `key` identifies the answer across frames, for caching its image.
pub(crate) fn render_answer(
    ui: &mut egui::Ui,
    key: &str,
    question: &Question,
    answer: &AnswerValue,
    view: &mut FieldUi,
) {
    let kind = match question.kind() {
        Ok(kind) => kind,
        Err(err) => {
            ui.colored_label(egui::Color32::RED, err.to_string());
            return;
        }
    };
    match kind {
        QuestionKind::SingleChoice => {
            ui.add_enabled_ui(false, |ui| {
                for option in question.option_texts() {
                    ui.radio(answer.as_str() == Some(option.as_str()), option);
                }
            });
        }
        QuestionKind::MultiChoice => {
            let chosen = answer.as_choices().unwrap_or_default();
            for option in question.option_texts() {
                let mut checked = chosen.contains(&option);
                ui.add_enabled(false, egui::Checkbox::new(&mut checked, option));
            }
        }
        QuestionKind::ShortText | QuestionKind::LongText | QuestionKind::Date => {
            match answer.as_str().filter(|text| !text.is_empty()) {
                Some(text) => ui.label(text),
                None => ui.weak("No answer provided"),
            };
        }
        QuestionKind::NumericScale => {
            let mut position = answer.as_scale().unwrap_or_default();
            ui.add_enabled(false, egui::Slider::new(&mut position, 0..=SCALE_MAX));
        }
        QuestionKind::ImageFile | QuestionKind::SignatureFile => {
            let missing = if kind == QuestionKind::ImageFile {
                "No image provided"
            } else {
                "No signature provided"
            };
            let Some(file) = answer.as_file() else {
                ui.weak(missing);
                return;
            };
            let texture = view
                .answer_textures
                .entry(key.to_string())
                .or_insert_with(|| decode_image(ui.ctx(), key, file));
            match texture {
                Some(texture) => {
                    ui.add(
                        egui::Image::new(egui::load::SizedTexture::from_handle(texture))
                            .max_height(96.0),
                    );
                }
                None => {
                    ui.weak(missing);
                }
            }
        }
    }
}
