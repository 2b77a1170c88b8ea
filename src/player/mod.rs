//! Playlist controller.
//!
//! [`PlayerController`] is the single authority over which track is loaded and
//! whether it plays. Every user action and media notification goes through it,
//! and it keeps the view, the media session and the saved positions in step.

mod host;

pub use host::{MediaElement, MediaSession, PlayerView};

use crate::config::PlaybackOptions;
use crate::db::{KeyValueStore, PlaybackStore};
use crate::error::{PlayerError, Result};
use crate::models::{PlayerState, SessionAction, Track, TrackMetadata};
use crate::utils::{fmt_time, progress_percent};

pub struct PlayerController<M, V, S> {
    tracks: Vec<Track>,
    media: M,
    view: V,
    store: PlaybackStore<S>,
    session: Option<Box<dyn MediaSession>>,
    cover_url: Option<String>,
    options: PlaybackOptions,
    state: PlayerState,
    seeking: bool,
}

impl<M: MediaElement, V: PlayerView, S: KeyValueStore> PlayerController<M, V, S> {
    /// Build the controller and load the last active track without playing it.
    /// Returns `None` for a page without tracks.
    pub fn new(
        tracks: Vec<Track>,
        media: M,
        view: V,
        store: PlaybackStore<S>,
        options: PlaybackOptions,
    ) -> Option<Self> {
        Self::with_session(tracks, media, view, store, options, None, None)
    }

    pub fn with_session(
        tracks: Vec<Track>,
        media: M,
        view: V,
        store: PlaybackStore<S>,
        options: PlaybackOptions,
        session: Option<Box<dyn MediaSession>>,
        cover_url: Option<String>,
    ) -> Option<Self> {
        if tracks.is_empty() {
            tracing::info!(scope = %store.scope(), "no tracks on page, player disabled");
            return None;
        }

        let start = store.last_track(tracks.len());
        let mut controller = Self {
            tracks,
            media,
            view,
            store,
            session,
            cover_url,
            options,
            state: PlayerState {
                current_track_index: start,
                is_playing: false,
            },
            seeking: false,
        };
        controller.apply_track(start);
        tracing::info!(
            scope = %controller.store.scope(),
            tracks = controller.tracks.len(),
            start,
            "player ready"
        );
        Some(controller)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn has_prev(&self) -> bool {
        self.state.current_track_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.state.current_track_index + 1 < self.tracks.len()
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &PlaybackStore<S> {
        &self.store
    }

    // ===== Track selection =====

    /// Load a track into the media element without starting it.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlayerError::TrackOutOfRange {
                index,
                count: self.tracks.len(),
            });
        }
        let previous = self.state.current_track_index;
        if previous != index {
            self.view.mark_playing(previous, false);
            self.view.mark_current(previous, false);
        }
        self.state.current_track_index = index;
        self.apply_track(index);
        Ok(())
    }

    fn apply_track(&mut self, index: usize) {
        let track = &self.tracks[index];
        self.view.mark_current(index, true);
        self.media.set_source(&track.url, &track.title);
        // Becomes the start position of the new source, so any way of
        // starting it (toggle included) resumes where the listener left off.
        if self.options.resume_position {
            self.media.set_current_time(self.store.elapsed(index));
        }
        self.view.set_title(&track.title);
        self.view.set_navigation(index > 0, index + 1 < self.tracks.len());
        self.view.set_progress(0.0);
        self.view.set_time(&fmt_time(0.0), &fmt_time(0.0));

        if let Some(session) = self.session.as_mut() {
            session.set_metadata(&TrackMetadata::for_track(track, self.cover_url.as_deref()));
        }

        tracing::debug!(index, title = %track.title, "track selected");
        if let Err(err) = self.store.save_last_track(index) {
            tracing::warn!(error = %err, index, "failed to save current track");
        }
    }

    // ===== Transport =====

    /// Start the current track from its saved position.
    pub fn play(&mut self) {
        let index = self.state.current_track_index;
        let resume_at = if self.options.resume_position {
            self.store.elapsed(index)
        } else {
            0.0
        };
        self.media.set_current_time(resume_at);
        self.start_playback();
        tracing::debug!(index, resume_at, "play");
    }

    /// Start the current track wherever the media element currently is.
    pub fn resume(&mut self) {
        self.start_playback();
    }

    fn start_playback(&mut self) {
        let index = self.state.current_track_index;
        self.media.play();
        self.set_playing(true);
        self.view.scroll_to(index);
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.set_playing(false);
    }

    pub fn toggle_play(&mut self) {
        if self.media.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn prev(&mut self) {
        if !self.has_prev() {
            return;
        }
        self.switch_to(self.state.current_track_index - 1);
    }

    pub fn next(&mut self) {
        if !self.has_next() {
            return;
        }
        self.switch_to(self.state.current_track_index + 1);
    }

    fn switch_to(&mut self, index: usize) {
        self.pause();
        match self.select_track(index) {
            Ok(()) => self.play(),
            Err(err) => tracing::error!(error = %err, "track switch rejected"),
        }
    }

    /// A track row was clicked: toggle the current track, switch to any other.
    pub fn on_track_row_activated(&mut self, index: usize) {
        if index >= self.tracks.len() {
            tracing::warn!(index, count = self.tracks.len(), "click on unknown track row");
            return;
        }
        if index == self.state.current_track_index {
            self.toggle_play();
        } else {
            self.switch_to(index);
        }
    }

    // ===== Seeking =====

    /// The user grabbed the progress slider.
    pub fn begin_seek(&mut self) {
        self.seeking = true;
    }

    /// The slider was let go without committing a value.
    pub fn end_seek(&mut self) {
        self.seeking = false;
    }

    /// Slider moved while held: show the time it would land on.
    pub fn preview_seek(&mut self, fraction: f64) {
        let Some(duration) = self.media.duration() else {
            return;
        };
        let target = fraction.clamp(0.0, 1.0) * duration;
        self.view.set_time(&fmt_time(target), &fmt_time(duration));
    }

    /// The user released the progress slider at `fraction` (0-1).
    pub fn on_progress_change(&mut self, fraction: f64) {
        self.seeking = false;
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target = self.media.duration().map_or(0.0, |d| fraction * d);
        self.media.set_current_time(target);
        tracing::debug!(target, "seek from progress bar");
    }

    /// Absolute seek, as requested by the system media controls.
    pub fn seek_to(&mut self, seconds: f64) {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let target = match self.media.duration() {
            Some(duration) => seconds.min(duration),
            None => seconds,
        };
        self.media.set_current_time(target);
    }

    // ===== Media notifications =====

    /// The media element reported a new playback position.
    pub fn on_position_changed(&mut self) {
        if self.seeking {
            return;
        }
        // A freshly loaded source reports position 0 before its duration;
        // saving that would wipe the resume point.
        let Some(duration) = self.media.duration() else {
            return;
        };
        let elapsed = self.media.current_time();
        let index = self.state.current_track_index;

        if self.options.resume_position {
            if let Err(err) = self.store.save_elapsed(index, elapsed) {
                tracing::warn!(error = %err, index, "failed to save position");
            }
        }
        self.view.set_progress(progress_percent(elapsed, duration));
        self.view.set_time(&fmt_time(elapsed), &fmt_time(duration));
        if let Some(session) = self.session.as_mut() {
            session.set_position_state(elapsed.clamp(0.0, duration), duration);
        }
    }

    pub fn on_track_ended(&mut self) {
        let index = self.state.current_track_index;
        self.pause();
        if self.options.resume_position {
            if let Err(err) = self.store.reset_elapsed(index) {
                tracing::warn!(error = %err, index, "failed to reset position");
            }
        }
        if !self.options.auto_advance || !self.has_next() {
            tracing::debug!(index, "playlist stopped");
            return;
        }
        match self.select_track(index + 1) {
            Ok(()) => self.play(),
            Err(err) => tracing::error!(error = %err, "auto advance rejected"),
        }
    }

    /// Playback started outside the controller (native controls).
    pub fn on_media_played(&mut self) {
        if !self.state.is_playing && !self.media.is_paused() {
            self.set_playing(true);
            self.view.scroll_to(self.state.current_track_index);
        }
    }

    /// Playback stopped outside the controller, or a start was refused.
    /// Pause events are queued by the browser, so one can arrive after a
    /// track switch already restarted playback; only trust the media element.
    pub fn on_media_paused(&mut self) {
        if self.state.is_playing && self.media.is_paused() {
            self.set_playing(false);
        }
    }

    pub fn handle_session_action(&mut self, action: SessionAction) {
        tracing::debug!(action = action.name(), "media session action");
        match action {
            SessionAction::Play => self.play(),
            SessionAction::Pause => self.pause(),
            SessionAction::PreviousTrack => self.prev(),
            SessionAction::NextTrack => self.next(),
            SessionAction::SeekTo(seconds) => self.seek_to(seconds),
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.state.is_playing = playing;
        self.view.mark_playing(self.state.current_track_index, playing);
        if let Some(session) = self.session.as_mut() {
            session.set_playback_state(playing);
        }
    }
}
