// `navigator.mediaSession` binding. Support varies a lot between browsers
// (flaky in Chrome, `play` ignored in iOS PWAs), so every call goes through
// `Reflect` and failures are logged, never raised.
use crate::models::{SessionAction, TrackMetadata};
use crate::player::MediaSession;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone)]
pub struct WebMediaSession {
    session: JsValue,
    metadata_ctor: Option<Function>,
}

fn set_prop(target: &JsValue, key: &str, value: &JsValue) {
    if let Err(err) = Reflect::set(target, &JsValue::from_str(key), value) {
        tracing::debug!(key, error = ?err, "media session property rejected");
    }
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

impl WebMediaSession {
    /// `None` when the browser has no media session.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let navigator = JsValue::from(window.navigator());
        if !Reflect::has(&navigator, &JsValue::from_str("mediaSession")).unwrap_or(false) {
            return None;
        }
        let session = Reflect::get(&navigator, &JsValue::from_str("mediaSession")).ok()?;
        if session.is_undefined() || session.is_null() {
            return None;
        }
        let metadata_ctor = Reflect::get(&window, &JsValue::from_str("MediaMetadata"))
            .ok()
            .and_then(|ctor| ctor.dyn_into::<Function>().ok());
        Some(Self {
            session,
            metadata_ctor,
        })
    }

    /// Route every supported action to `dispatch`.
    pub fn register_actions<F>(&self, dispatch: F)
    where
        F: Fn(SessionAction) + Clone + 'static,
    {
        let Some(set_handler) = method(&self.session, "setActionHandler") else {
            return;
        };

        for name in SessionAction::NAMES {
            let dispatch = dispatch.clone();
            let handler = Closure::wrap(Box::new(move |details: JsValue| {
                let seek_time = Reflect::get(&details, &JsValue::from_str("seekTime"))
                    .ok()
                    .and_then(|t| t.as_f64());
                if let Some(action) = SessionAction::from_name(name, seek_time) {
                    dispatch(action);
                }
            }) as Box<dyn FnMut(JsValue)>);

            if let Err(err) =
                set_handler.call2(&self.session, &JsValue::from_str(name), handler.as_ref())
            {
                tracing::debug!(action = name, error = ?err, "media session action unsupported");
            }
            handler.forget();
        }
    }
}

impl MediaSession for WebMediaSession {
    fn set_metadata(&mut self, metadata: &TrackMetadata) {
        let Some(ctor) = &self.metadata_ctor else {
            return;
        };
        let init = Object::new();
        set_prop(&init, "title", &JsValue::from_str(&metadata.title));
        set_prop(&init, "artist", &JsValue::from_str(&metadata.artist));
        set_prop(&init, "album", &JsValue::from_str(&metadata.album));
        if let Some(src) = &metadata.artwork {
            let image = Object::new();
            set_prop(&image, "src", &JsValue::from_str(src));
            set_prop(&init, "artwork", &Array::of1(&image));
        }

        match Reflect::construct(ctor, &Array::of1(&init)) {
            Ok(meta) => set_prop(&self.session, "metadata", &meta),
            Err(err) => tracing::debug!(error = ?err, "MediaMetadata construction failed"),
        }
    }

    fn set_playback_state(&mut self, playing: bool) {
        let state = if playing { "playing" } else { "paused" };
        set_prop(&self.session, "playbackState", &JsValue::from_str(state));
    }

    fn set_position_state(&mut self, position: f64, duration: f64) {
        let Some(set_position) = method(&self.session, "setPositionState") else {
            return;
        };
        let state = Object::new();
        set_prop(&state, "duration", &JsValue::from_f64(duration));
        set_prop(&state, "playbackRate", &JsValue::from_f64(1.0));
        set_prop(&state, "position", &JsValue::from_f64(position));
        if let Err(err) = set_position.call1(&self.session, &state) {
            tracing::debug!(error = ?err, "setPositionState rejected");
        }
    }
}
