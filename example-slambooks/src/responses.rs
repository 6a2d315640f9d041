use slambook::{FileFetcher, FileHandle, StoredResponse, SubmittedResponse, decode_responses};

use crate::farewell;

/// Responses to [`farewell`], as the backend stores them.
pub const FAREWELL_RESPONSES_JSON: &str = include_str!("../fixtures/farewell_responses.json");

const AUTOGRAPH_PNG: &[u8] = include_bytes!("../fixtures/autograph.png");

/// The files the stored responses refer to that ship with the fixtures.
///
/// Only `autograph-101.png` is bundled; any other name fails to fetch.
#[derive(Debug, Default)]
pub struct FixtureFiles;

impl FileFetcher for FixtureFiles {
    fn fetch(&mut self, name: &str) -> anyhow::Result<FileHandle> {
        match name {
            "autograph-101.png" => Ok(FileHandle::new(name, AUTOGRAPH_PNG)),
            _ => anyhow::bail!("{name} is not bundled with the fixtures"),
        }
    }
}

/// Decode [`FAREWELL_RESPONSES_JSON`] against [`farewell`].
pub fn farewell_responses(files: &mut impl FileFetcher) -> anyhow::Result<Vec<SubmittedResponse>> {
    let stored: Vec<StoredResponse> = serde_json::from_str(FAREWELL_RESPONSES_JSON)?;
    Ok(decode_responses(&farewell(), stored, files))
}
