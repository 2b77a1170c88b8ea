//! Fake host for driving the controller without a browser.
//!
//! Each fake shares its state through `Rc<RefCell<_>>` so tests keep a handle
//! after the fake moves into the controller.

#![allow(dead_code)]

use album_player::config::PlaybackOptions;
use album_player::{
    MediaElement, MediaSession, MemoryStore, PlaybackStore, PlayerController, PlayerView, Track,
    TrackMetadata,
};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

pub const PAGE: &str = "/music/blue-train";

#[derive(Debug, Default)]
pub struct MediaState {
    pub src: String,
    pub title: String,
    pub paused: bool,
    pub time: f64,
    pub duration: Option<f64>,
    pub play_calls: usize,
}

#[derive(Clone)]
pub struct FakeMedia(pub Rc<RefCell<MediaState>>);

impl FakeMedia {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(MediaState {
            paused: true,
            ..MediaState::default()
        })))
    }

    /// Simulate the browser loading metadata and advancing playback.
    pub fn tick(&self, time: f64, duration: f64) {
        let mut state = self.0.borrow_mut();
        state.time = time;
        state.duration = Some(duration);
    }
}

impl MediaElement for FakeMedia {
    fn set_source(&mut self, url: &str, title: &str) {
        let mut state = self.0.borrow_mut();
        state.src = url.to_string();
        state.title = title.to_string();
        state.time = 0.0;
        state.duration = None;
    }

    fn play(&mut self) {
        let mut state = self.0.borrow_mut();
        state.paused = false;
        state.play_calls += 1;
    }

    fn pause(&mut self) {
        self.0.borrow_mut().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.0.borrow().paused
    }

    fn current_time(&self) -> f64 {
        self.0.borrow().time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.0.borrow_mut().time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.0.borrow().duration
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub current: BTreeSet<usize>,
    pub playing: BTreeSet<usize>,
    pub scrolled: Vec<usize>,
    pub title: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub progress: f64,
    pub elapsed: String,
    pub total: String,
}

#[derive(Clone, Default)]
pub struct FakeView(pub Rc<RefCell<ViewState>>);

impl PlayerView for FakeView {
    fn mark_current(&mut self, index: usize, current: bool) {
        let mut state = self.0.borrow_mut();
        if current {
            state.current.insert(index);
        } else {
            state.current.remove(&index);
        }
    }

    fn mark_playing(&mut self, index: usize, playing: bool) {
        let mut state = self.0.borrow_mut();
        if playing {
            state.playing.insert(index);
        } else {
            state.playing.remove(&index);
        }
    }

    fn scroll_to(&mut self, index: usize) {
        self.0.borrow_mut().scrolled.push(index);
    }

    fn set_title(&mut self, title: &str) {
        self.0.borrow_mut().title = title.to_string();
    }

    fn set_navigation(&mut self, prev_enabled: bool, next_enabled: bool) {
        let mut state = self.0.borrow_mut();
        state.prev_enabled = prev_enabled;
        state.next_enabled = next_enabled;
    }

    fn set_progress(&mut self, percent: f64) {
        self.0.borrow_mut().progress = percent;
    }

    fn set_time(&mut self, elapsed: &str, total: &str) {
        let mut state = self.0.borrow_mut();
        state.elapsed = elapsed.to_string();
        state.total = total.to_string();
    }
}

#[derive(Debug, Default)]
pub struct SessionLog {
    pub metadata: Vec<TrackMetadata>,
    pub playback_state: Option<bool>,
    pub position: Option<(f64, f64)>,
}

#[derive(Clone, Default)]
pub struct FakeSession(pub Rc<RefCell<SessionLog>>);

impl MediaSession for FakeSession {
    fn set_metadata(&mut self, metadata: &TrackMetadata) {
        self.0.borrow_mut().metadata.push(metadata.clone());
    }

    fn set_playback_state(&mut self, playing: bool) {
        self.0.borrow_mut().playback_state = Some(playing);
    }

    fn set_position_state(&mut self, position: f64, duration: f64) {
        self.0.borrow_mut().position = Some((position, duration));
    }
}

pub type TestPlayer = PlayerController<FakeMedia, FakeView, MemoryStore>;

pub fn tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track::new(i, format!("{PAGE}/{:02}.mp3", i + 1), format!("Track {}", i + 1)))
        .collect()
}

pub struct Harness {
    pub player: TestPlayer,
    pub media: FakeMedia,
    pub view: FakeView,
    pub session: FakeSession,
}

impl Harness {
    pub fn new(count: usize) -> Self {
        Self::with_store(count, MemoryStore::new(), PlaybackOptions::default())
    }

    pub fn with_store(count: usize, store: MemoryStore, options: PlaybackOptions) -> Self {
        Self::try_with_store(count, store, options).expect("harness needs at least one track")
    }

    pub fn try_with_store(
        count: usize,
        store: MemoryStore,
        options: PlaybackOptions,
    ) -> Option<Self> {
        let media = FakeMedia::new();
        let view = FakeView::default();
        let session = FakeSession::default();
        let player = PlayerController::with_session(
            tracks(count),
            media.clone(),
            view.clone(),
            PlaybackStore::new(PAGE, store),
            options,
            Some(Box::new(session.clone())),
            Some(format!("{PAGE}/cover.jpg")),
        )?;
        Some(Self {
            player,
            media,
            view,
            session,
        })
    }

    /// Carry the persisted storage over to a freshly loaded page.
    pub fn reload(self) -> Self {
        let count = self.player.track_count();
        let store = self.player.store().inner().clone();
        Self::with_store(count, store, PlaybackOptions::default())
    }

    pub fn current(&self) -> usize {
        self.player.state().current_track_index
    }
}
