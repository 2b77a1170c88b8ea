use crate::error::Result;
use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
use crate::error::PlayerError;
#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

/// String key-value storage the playback position is persisted to.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage that lives only as long as the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser `localStorage`, accessed as raw strings so values stay readable
/// (`"3"`, `"41.52"`) rather than JSON-encoded.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// `None` when the page has no usable `localStorage` (sandboxed iframes,
    /// some private modes). `LocalStorage::raw` panics in that case.
    pub fn open() -> Option<Self> {
        web_sys::window()?.local_storage().ok()??;
        Some(Self)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| PlayerError::Storage(format!("{e:?}")))
    }
}

/// Typed view over a [`KeyValueStore`], scoped to one page path.
///
/// Keys:
/// - `<scope>` holds the last active track index
/// - `<scope>:<index>` holds the elapsed seconds for that track
#[derive(Debug, Clone)]
pub struct PlaybackStore<S> {
    scope: String,
    store: S,
}

impl<S: KeyValueStore> PlaybackStore<S> {
    pub fn new(scope: impl Into<String>, store: S) -> Self {
        Self {
            scope: scope.into(),
            store,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    fn position_key(&self, index: usize) -> String {
        format!("{}:{index}", self.scope)
    }

    /// Last active track, or 0 when nothing valid was saved.
    pub fn last_track(&self, track_count: usize) -> usize {
        let Some(raw) = self.store.get(&self.scope) else {
            return 0;
        };
        match raw.trim().parse::<usize>() {
            Ok(index) if index < track_count => index,
            Ok(index) => {
                tracing::debug!(scope = %self.scope, index, track_count, "saved track out of range");
                0
            }
            Err(_) => {
                tracing::debug!(scope = %self.scope, raw = %raw, "saved track is not an index");
                0
            }
        }
    }

    pub fn save_last_track(&mut self, index: usize) -> Result<()> {
        self.store.set(&self.scope, &index.to_string())
    }

    /// Saved position for a track in seconds, or 0 when nothing valid was saved.
    pub fn elapsed(&self, index: usize) -> f64 {
        self.store
            .get(&self.position_key(index))
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .unwrap_or(0.0)
    }

    pub fn save_elapsed(&mut self, index: usize, seconds: f64) -> Result<()> {
        let key = self.position_key(index);
        self.store.set(&key, &seconds.max(0.0).to_string())
    }

    pub fn reset_elapsed(&mut self, index: usize) -> Result<()> {
        self.save_elapsed(index, 0.0)
    }
}
