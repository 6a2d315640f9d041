//! Load a question set from backend JSON, fill it in and print the submit payload.
//!
//! Uploads are stood in for by a local counter.
//!
//! Run with: cargo run -p slambook-form-egui --example from_json

use example_slambooks::class_of_2024;
use slambook::{Answers, FileHandle, FileUploader, FormBackend, prepare_submission};
use slambook_form_egui::EguiBackend;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct LocalUploader {
    uploaded: usize,
}

impl FileUploader for LocalUploader {
    fn upload(&mut self, file: &FileHandle) -> anyhow::Result<String> {
        self.uploaded += 1;
        Ok(format!("file:///uploads/{}-{}", self.uploaded, file.name()))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_target(false)
        .init();

    let set = class_of_2024()?;
    let answers = EguiBackend::new()
        .with_title(set.title.clone())
        .collect(&set, &Answers::new())?;

    let submission = prepare_submission(&set, &answers, &mut LocalUploader::default())?;
    println!("{:#}", submission.to_json());
    Ok(())
}
