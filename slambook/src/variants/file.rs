use slambook_types::{AnswerValue, FileHandle, QuestionKind};

use crate::contract::QuestionWidget;
use crate::preview::{PreviewRegistry, PreviewUrl};

/// What the file picker reports.
#[derive(Debug, Clone, PartialEq)]
pub enum FileEvent {
    /// A file was chosen.
    Pick(FileHandle),
    /// The chosen file was removed.
    Clear,
}

fn apply_file_event(event: FileEvent) -> Option<Option<FileHandle>> {
    match event {
        FileEvent::Pick(file) => Some(Some(file)),
        FileEvent::Clear => Some(None),
    }
}

fn file_from_answer(answer: AnswerValue) -> Result<Option<FileHandle>, AnswerValue> {
    match answer {
        AnswerValue::File(file) => Ok(file),
        other => Err(other),
    }
}

/// Image upload.
#[derive(Debug, Clone, Default)]
pub struct ImageFile;

impl QuestionWidget for ImageFile {
    type Value = Option<FileHandle>;
    type Event = FileEvent;

    const KIND: QuestionKind = QuestionKind::ImageFile;

    fn empty() -> Option<FileHandle> {
        None
    }

    fn apply(&self, _staged: &Option<FileHandle>, event: FileEvent) -> Option<Option<FileHandle>> {
        apply_file_event(event)
    }

    fn into_answer(value: Option<FileHandle>) -> AnswerValue {
        AnswerValue::File(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<Option<FileHandle>, AnswerValue> {
        file_from_answer(answer)
    }
}

/// Signature upload with a local preview of the staged file.
///
/// The preview follows the staged file: it is regenerated when the file
/// changes and released when the file is cleared or the widget is dropped.
#[derive(Debug)]
pub struct SignatureFile {
    previews: PreviewRegistry,
    preview: Option<PreviewUrl>,
}

impl SignatureFile {
    pub fn new(previews: PreviewRegistry) -> Self {
        Self {
            previews,
            preview: None,
        }
    }

    /// The preview of the currently staged file, if any.
    pub fn preview(&self) -> Option<&PreviewUrl> {
        self.preview.as_ref()
    }
}

impl QuestionWidget for SignatureFile {
    type Value = Option<FileHandle>;
    type Event = FileEvent;

    const KIND: QuestionKind = QuestionKind::SignatureFile;

    fn empty() -> Option<FileHandle> {
        None
    }

    fn apply(&self, _staged: &Option<FileHandle>, event: FileEvent) -> Option<Option<FileHandle>> {
        apply_file_event(event)
    }

    fn restaged(&mut self, value: &Option<FileHandle>) {
        // Assigning drops, and so releases, the superseded preview.
        self.preview = value.as_ref().map(|file| self.previews.create(file));
    }

    fn into_answer(value: Option<FileHandle>) -> AnswerValue {
        AnswerValue::File(value)
    }

    fn from_answer(answer: AnswerValue) -> Result<Option<FileHandle>, AnswerValue> {
        file_from_answer(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::testing::Recorder;
    use crate::contract::{Widget, WidgetConfig};

    fn file(name: &str) -> FileHandle {
        FileHandle::new(name, name.as_bytes().to_vec())
    }

    #[test]
    fn image_pick_and_clear() {
        let recorder = Recorder::default();
        let mut widget = Widget::new(
            ImageFile,
            WidgetConfig::new("Your photo").on_answer_change(recorder.callback()),
        );

        assert!(widget.interact(FileEvent::Pick(file("me.jpg"))));
        assert_eq!(widget.value().as_ref().map(FileHandle::name), Some("me.jpg"));

        assert!(widget.interact(FileEvent::Clear));
        assert!(widget.value().is_none());
        assert!(!widget.interact(FileEvent::Clear));
        assert_eq!(recorder.last(), Some(AnswerValue::File(None)));
    }

    #[test]
    fn repeated_picks_keep_one_preview() {
        let registry = PreviewRegistry::new();
        let mut widget = Widget::new(
            SignatureFile::new(registry.clone()),
            WidgetConfig::new("Sign here"),
        );
        assert!(widget.variant().preview().is_none());

        for i in 0..5 {
            widget.interact(FileEvent::Pick(file(&format!("sig{i}.png"))));
            assert_eq!(registry.live_count(), 1);
        }
        let url = widget.variant().preview().unwrap().as_str().to_string();
        assert_eq!(registry.resolve(&url).unwrap().name(), "sig4.png");

        widget.interact(FileEvent::Clear);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn preview_follows_external_value() {
        let registry = PreviewRegistry::new();
        let mut widget = Widget::new(
            SignatureFile::new(registry.clone()),
            WidgetConfig::new("Sign here")
                .preview(true)
                .value(Some(file("first.png"))),
        );
        assert_eq!(registry.live_count(), 1);

        widget.sync(Some(Some(file("second.png"))));
        assert_eq!(registry.live_count(), 1);
        let url = widget.variant().preview().unwrap().as_str().to_string();
        assert_eq!(registry.resolve(&url).unwrap().name(), "second.png");

        widget.sync(None);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn dropping_the_widget_releases_its_preview() {
        let registry = PreviewRegistry::new();
        let widget = Widget::new(
            SignatureFile::new(registry.clone()),
            WidgetConfig::new("Sign here").value(Some(file("sig.png"))),
        );
        assert_eq!(registry.live_count(), 1);
        drop(widget);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn preview_mode_ignores_picks() {
        let registry = PreviewRegistry::new();
        let recorder = Recorder::default();
        let mut widget = Widget::new(
            SignatureFile::new(registry.clone()),
            WidgetConfig::new("Sign here")
                .preview(true)
                .on_answer_change(recorder.callback()),
        );
        assert!(!widget.interact(FileEvent::Pick(file("sig.png"))));
        assert_eq!(registry.live_count(), 0);
        assert!(recorder.calls().is_empty());
    }
}
