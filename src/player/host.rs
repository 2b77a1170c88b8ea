// Seams between the controller and whatever hosts it: the browser in
// production, fakes in tests.
use crate::models::TrackMetadata;

/// The single audio element the player drives.
pub trait MediaElement {
    fn set_source(&mut self, url: &str, title: &str);
    /// Fire-and-forget; a refused start surfaces later as a pause notification.
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// `None` until the media has loaded enough to know its length.
    fn duration(&self) -> Option<f64>;
}

/// Visual state of the player page.
pub trait PlayerView {
    fn mark_current(&mut self, index: usize, current: bool);
    /// Playing indicator on the track row and the play/pause control.
    fn mark_playing(&mut self, index: usize, playing: bool);
    fn scroll_to(&mut self, index: usize);
    fn set_title(&mut self, title: &str);
    fn set_navigation(&mut self, prev_enabled: bool, next_enabled: bool);
    /// `percent` is on a 0-100 scale.
    fn set_progress(&mut self, percent: f64);
    fn set_time(&mut self, elapsed: &str, total: &str);
}

/// The host's system-level media controls (lock screen, media keys overlay).
pub trait MediaSession {
    fn set_metadata(&mut self, metadata: &TrackMetadata);
    fn set_playback_state(&mut self, playing: bool);
    fn set_position_state(&mut self, position: f64, duration: f64);
}
