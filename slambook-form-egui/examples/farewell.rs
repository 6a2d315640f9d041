//! Fill in a slambook with every question type.
//!
//! Run with: cargo run -p slambook-form-egui --example farewell

use example_slambooks::farewell;
use slambook::{Answers, FormBackend};
use slambook_form_egui::EguiBackend;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let backend = EguiBackend::new()
        .with_title("Farewell slambook")
        .with_window_size([520.0, 720.0]);
    let answers = backend.collect(&farewell(), &Answers::new())?;
    for (id, answer) in &answers {
        println!("{id}: {answer:?}");
    }
    Ok(())
}
