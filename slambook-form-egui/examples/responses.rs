//! Page through stored responses, read-only, by response or by question.
//!
//! Run with: cargo run -p slambook-form-egui --example responses

use example_slambooks::{FixtureFiles, farewell, farewell_responses};
use slambook_form_egui::EguiBackend;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let responses = farewell_responses(&mut FixtureFiles)?;
    EguiBackend::new()
        .with_title("Responses")
        .with_window_size([520.0, 720.0])
        .browse(&farewell(), responses)?;
    Ok(())
}
