// `MediaElement` over the page's <audio> tag.
use crate::player::MediaElement;
use crate::utils::known_duration;
use web_sys::{Event, HtmlAudioElement};

pub struct WebAudio {
    audio: HtmlAudioElement,
}

impl WebAudio {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self { audio }
    }
}

/// A refused `play()` fires no event of its own; raise a `pause` so the
/// listeners fall back to the non-playing state. Must run after the handler
/// that called `play()` has released the player.
fn report_refused_start(audio: &HtmlAudioElement) {
    let dispatched = Event::new("pause").and_then(|event| audio.dispatch_event(&event));
    if let Err(err) = dispatched {
        tracing::debug!(error = ?err, "failed to dispatch pause");
    }
}

impl MediaElement for WebAudio {
    fn set_source(&mut self, url: &str, title: &str) {
        self.audio.set_src(url);
        self.audio.set_title(title);
    }

    fn play(&mut self) {
        match self.audio.play() {
            Ok(promise) => {
                let audio = self.audio.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        tracing::debug!(error = ?err, "playback start refused");
                        report_refused_start(&audio);
                    }
                });
            }
            Err(err) => {
                tracing::debug!(error = ?err, "play() threw");
                let audio = self.audio.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    report_refused_start(&audio);
                });
            }
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            tracing::debug!(error = ?err, "pause() threw");
        }
    }

    fn is_paused(&self) -> bool {
        self.audio.paused()
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        known_duration(self.audio.duration())
    }
}
