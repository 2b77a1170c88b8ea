//! Album page player.
//!
//! Binds to server-rendered playlist markup (track rows, an `<audio>` element,
//! an optional control bar) and drives playback: play/pause, seeking, track
//! switching and auto-advance. Per-track positions and the active track are
//! kept in `localStorage`, scoped by page path, so a reload resumes where the
//! listener left off.
//!
//! The controller core is platform-agnostic and talks to the page through the
//! traits in [`player`]; the `web` module (wasm32 only) provides the browser
//! implementations and the `#[wasm_bindgen(start)]` entry point.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod player;
pub mod shortcuts;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::PlayerConfig;
pub use db::{KeyValueStore, MemoryStore, PlaybackStore};
pub use error::{PlayerError, Result};
pub use models::{PlayerState, SessionAction, Track, TrackMetadata};
pub use player::{MediaElement, MediaSession, PlayerController, PlayerView};
pub use utils::fmt_time;
