//! Browser entry point: locate the playlist markup, build the controller and
//! wire page events to it.

mod audio;
mod dom;
mod media_session;

pub use audio::WebAudio;
pub use dom::{ControlBar, DomView};
pub use media_session::WebMediaSession;

use crate::config::{PlayerConfig, CONFIG_ELEMENT_ID};
use crate::db::{KeyValueStore, LocalStore, MemoryStore, PlaybackStore};
use crate::error::{PlayerError, Result};
use crate::models::SessionAction;
use crate::player::{MediaSession, PlayerController};
use crate::shortcuts::{shortcut_action, KeyPress, ShortcutAction};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlAudioElement, KeyboardEvent};

/// `localStorage` when the page has it, otherwise positions live for the
/// page's lifetime only.
pub enum PageStore {
    Local(LocalStore),
    Memory(MemoryStore),
}

impl PageStore {
    fn open() -> Self {
        match LocalStore::open() {
            Some(store) => Self::Local(store),
            None => {
                tracing::warn!("localStorage unavailable, positions will not survive reloads");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for PageStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Local(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }
}

pub type WebPlayer = PlayerController<WebAudio, DomView, PageStore>;
pub type SharedPlayer = Rc<RefCell<WebPlayer>>;

thread_local! {
    static MOUNTED: Cell<bool> = Cell::new(false);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let loading = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .is_some_and(|state| state == "loading");

    if loading {
        let on_ready = Closure::wrap(Box::new(mount_once) as Box<dyn FnMut()>);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .is_err()
        {
            mount_once();
        }
        on_ready.forget();
    } else {
        mount_once();
    }
}

fn mount_once() {
    if MOUNTED.with(|m| m.replace(true)) {
        return;
    }
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let config_result = read_config(&document);
    let config = config_result.as_ref().cloned().unwrap_or_default();
    if let Err(err) = dioxus_logger::init(config.level()) {
        tracing::debug!(error = %err, "logger already installed");
    }
    if let Err(err) = &config_result {
        tracing::warn!(error = %err, "ignoring player config");
    }

    match mount(&document, config) {
        Ok(Some(_)) => {}
        Ok(None) => tracing::debug!("player not mounted"),
        Err(err) => tracing::error!(error = %err, "player failed to mount"),
    }
}

fn read_config(document: &Document) -> Result<PlayerConfig> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(raw) if !raw.trim().is_empty() => PlayerConfig::from_json(&raw),
        _ => Ok(PlayerConfig::default()),
    }
}

fn page_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Build the player for `document`. `Ok(None)` for pages without tracks.
pub fn mount(document: &Document, config: PlayerConfig) -> Result<Option<SharedPlayer>> {
    let (tracks, rows) = dom::read_tracks(document, &config.selectors.track);
    if tracks.is_empty() {
        tracing::info!("no tracks on page");
        return Ok(None);
    }

    let audio = dom::query(document, &config.selectors.audio)
        .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
        .ok_or_else(|| PlayerError::MissingElement(config.selectors.audio.clone()))?;

    let capabilities = config.capabilities;
    let view = DomView::new(
        document,
        rows,
        &config.selectors,
        config.classes.clone(),
        capabilities,
    );
    let store = PlaybackStore::new(page_path(), PageStore::open());
    let session = capabilities
        .media_session
        .then(WebMediaSession::detect)
        .flatten();
    let cover = dom::cover_url(document, &config.selectors.cover);

    // Action handlers keep their own handle on the same JS session object.
    let session_handle = session.clone();
    let session = session.map(|s| Box::new(s) as Box<dyn MediaSession>);

    let Some(player) = PlayerController::with_session(
        tracks,
        WebAudio::new(audio.clone()),
        view,
        store,
        config.playback,
        session,
        cover,
    ) else {
        return Ok(None);
    };
    let player: SharedPlayer = Rc::new(RefCell::new(player));

    bind_media(&player, &audio);
    bind_rows(&player);
    if capabilities.title_toggle {
        bind_title(&player);
    }
    if capabilities.control_bar {
        bind_controls(&player);
    }
    if capabilities.keyboard_shortcuts {
        bind_keyboard(&player, document);
    }
    if let Some(session) = session_handle {
        let player = player.clone();
        session.register_actions(move |action: SessionAction| {
            with_player(&player, action.name(), |p| p.handle_session_action(action));
        });
    }

    Ok(Some(player))
}

/// Run `f` against the player unless another handler currently holds it.
fn with_player(player: &SharedPlayer, event: &str, f: impl FnOnce(&mut WebPlayer)) {
    match player.try_borrow_mut() {
        Ok(mut p) => f(&mut p),
        Err(_) => tracing::debug!(event, "player busy, event dropped"),
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
    {
        tracing::warn!(event, error = ?err, "failed to add listener");
    }
    callback.forget();
}

fn bind_media(player: &SharedPlayer, audio: &HtmlAudioElement) {
    let bindings: [(&'static str, fn(&mut WebPlayer)); 4] = [
        ("timeupdate", WebPlayer::on_position_changed),
        ("ended", WebPlayer::on_track_ended),
        ("play", WebPlayer::on_media_played),
        ("pause", WebPlayer::on_media_paused),
    ];
    for (event, action) in bindings {
        let player = player.clone();
        listen(audio, event, move |_| with_player(&player, event, action));
    }
}

fn bind_rows(player: &SharedPlayer) {
    let rows: Vec<Element> = player.borrow().view().rows().to_vec();
    for (index, row) in rows.iter().enumerate() {
        let player = player.clone();
        listen(row, "click", move |_| {
            with_player(&player, "track click", |p| p.on_track_row_activated(index));
        });
    }
}

fn bind_title(player: &SharedPlayer) {
    let Some(title) = player.borrow().view().title().cloned() else {
        return;
    };
    let player = player.clone();
    listen(&title, "click", move |_| {
        with_player(&player, "title click", WebPlayer::toggle_play);
    });
}

fn bind_controls(player: &SharedPlayer) {
    let (prev, next, play_pause, progress) = {
        let p = player.borrow();
        let controls = p.view().controls();
        (
            controls.prev.clone(),
            controls.next.clone(),
            controls.play_pause.clone(),
            controls.progress.clone(),
        )
    };

    let buttons: [(Option<Element>, &'static str, fn(&mut WebPlayer)); 3] = [
        (prev, "prev click", WebPlayer::prev),
        (next, "next click", WebPlayer::next),
        (play_pause, "play/pause click", WebPlayer::toggle_play),
    ];
    for (element, event, action) in buttons {
        if let Some(element) = element {
            let player = player.clone();
            listen(&element, "click", move |_| with_player(&player, event, action));
        }
    }

    let Some(slider) = progress else {
        return;
    };
    for event in ["pointerdown", "mousedown", "touchstart"] {
        let player = player.clone();
        listen(&slider, event, move |_| {
            with_player(&player, event, WebPlayer::begin_seek);
        });
    }
    {
        let player = player.clone();
        let input = slider.clone();
        listen(&slider, "input", move |_| {
            let fraction = dom::slider_fraction(&input);
            with_player(&player, "seek preview", |p| p.preview_seek(fraction));
        });
    }
    {
        let player = player.clone();
        let input = slider.clone();
        listen(&slider, "change", move |_| {
            let fraction = dom::slider_fraction(&input);
            with_player(&player, "seek", |p| p.on_progress_change(fraction));
        });
    }

    // A tap that commits nothing fires no `change`; release the drag anyway.
    if let Some(document) = slider.owner_document() {
        for event in ["pointerup", "mouseup", "touchend", "touchcancel"] {
            let player = player.clone();
            listen(&document, event, move |_| {
                with_player(&player, event, |p| {
                    if p.is_seeking() {
                        p.end_seek();
                    }
                });
            });
        }
    }
}

fn is_editable_target(event: &KeyboardEvent) -> bool {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element
            .get_attribute("contenteditable")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
        {
            return true;
        }
        current = element.parent_element();
    }
    false
}

fn key_press(event: &KeyboardEvent) -> KeyPress {
    KeyPress {
        key: event.key(),
        code: event.code(),
        key_code: event.key_code(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
        shift: event.shift_key(),
        ignored: event.default_prevented() || event.is_composing() || is_editable_target(event),
    }
}

fn bind_keyboard(player: &SharedPlayer, document: &Document) {
    let player = player.clone();
    listen(document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(action) = shortcut_action(&key_press(event)) else {
            return;
        };
        event.prevent_default();
        with_player(&player, "shortcut", |p| match action {
            ShortcutAction::Next => p.next(),
            ShortcutAction::Previous => p.prev(),
            ShortcutAction::TogglePlay => p.toggle_play(),
        });
    });
}
