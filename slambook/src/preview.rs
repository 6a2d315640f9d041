//! Transient local previews of picked files.
//!
//! A [`PreviewUrl`] is a `preview:<n>` reference to a file, resolvable through
//! the [`PreviewRegistry`] that issued it. The reference is released when the
//! guard is dropped, so replacing or discarding it cannot leak registry entries.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use slambook_types::FileHandle;
use tracing::trace;

const SCHEME: &str = "preview:";

#[derive(Default)]
struct Entries {
    next_id: u64,
    live: HashMap<u64, FileHandle>,
}

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Issues and resolves preview references. Clones share the same entries.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    entries: Arc<Mutex<Entries>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a preview reference for `file`.
    pub fn create(&self, file: &FileHandle) -> PreviewUrl {
        let mut entries = lock(&self.entries);
        let id = entries.next_id;
        entries.next_id += 1;
        entries.live.insert(id, file.clone());
        trace!(id, name = file.name(), "preview acquired");
        PreviewUrl {
            id,
            url: format!("{SCHEME}{id}"),
            entries: Arc::downgrade(&self.entries),
        }
    }

    /// Look up the file behind a live preview reference.
    pub fn resolve(&self, url: &str) -> Option<FileHandle> {
        let id = url.strip_prefix(SCHEME)?.parse().ok()?;
        lock(&self.entries).live.get(&id).cloned()
    }

    /// Number of previews not yet released.
    pub fn live_count(&self) -> usize {
        lock(&self.entries).live.len()
    }
}

impl fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

/// A live preview reference. Released on drop.
pub struct PreviewUrl {
    id: u64,
    url: String,
    entries: Weak<Mutex<Entries>>,
}

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Unique per registry, usable as a cache key by renderers.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            lock(&entries).live.remove(&self.id);
            trace!(id = self.id, "preview released");
        }
    }
}

impl fmt::Debug for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewUrl").field(&self.url).finish()
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
