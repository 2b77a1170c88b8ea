// DOM side of the player: read the playlist markup and reflect state into it.
use crate::config::{Capabilities, Classes, Selectors};
use crate::models::Track;
use crate::player::PlayerView;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlImageElement, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

/// First element matching `selector`, `None` for blank or invalid selectors.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    if selector.trim().is_empty() {
        return None;
    }
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(selector, error = ?err, "invalid selector");
            None
        }
    }
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!(selector, error = ?err, "invalid selector");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Track rows and the tracks they describe, in page order. Rows without a
/// `data-url` are skipped so positions stay aligned with playable tracks.
pub fn read_tracks(document: &Document, selector: &str) -> (Vec<Track>, Vec<Element>) {
    let mut tracks = Vec::new();
    let mut rows = Vec::new();

    for element in query_all(document, selector) {
        let Some(url) = element.get_attribute("data-url").filter(|u| !u.is_empty()) else {
            tracing::warn!("track row without data-url skipped");
            continue;
        };
        let position = tracks.len();
        let title = element
            .get_attribute("data-title")
            .or_else(|| element.text_content())
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if let Some(declared) = element.get_attribute("data-index") {
            if declared.trim().parse::<usize>().ok() != Some(position) {
                tracing::warn!(declared = %declared, position, "track data-index differs from its position");
            }
        }

        tracks.push(Track::new(position, url, title));
        rows.push(element);
    }

    (tracks, rows)
}

pub fn cover_url(document: &Document, selector: &str) -> Option<String> {
    let img = query(document, selector)?.dyn_into::<HtmlImageElement>().ok()?;
    let src = img.src();
    (!src.is_empty()).then_some(src)
}

/// Position of a range input's thumb as a 0-1 fraction of its min..max span.
pub fn slider_fraction(input: &HtmlInputElement) -> f64 {
    let (min, max) = slider_bounds(input);
    let value = input.value().parse::<f64>().unwrap_or(min);
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

fn slider_bounds(input: &HtmlInputElement) -> (f64, f64) {
    let min = input.min().parse::<f64>().unwrap_or(0.0);
    let max = input.max().parse::<f64>().unwrap_or(100.0);
    if max > min {
        (min, max)
    } else {
        (0.0, 100.0)
    }
}

/// Elements of the custom control bar. All optional.
#[derive(Default)]
pub struct ControlBar {
    pub prev: Option<Element>,
    pub next: Option<Element>,
    pub play_pause: Option<Element>,
    pub progress: Option<HtmlInputElement>,
    pub elapsed: Option<Element>,
    pub total: Option<Element>,
}

impl ControlBar {
    pub fn locate(document: &Document, selectors: &Selectors) -> Self {
        Self {
            prev: query(document, &selectors.prev),
            next: query(document, &selectors.next),
            play_pause: query(document, &selectors.play_pause),
            progress: query(document, &selectors.progress)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
            elapsed: query(document, &selectors.elapsed),
            total: query(document, &selectors.total),
        }
    }
}

pub struct DomView {
    rows: Vec<Element>,
    title: Option<Element>,
    controls: ControlBar,
    classes: Classes,
}

impl DomView {
    pub fn new(
        document: &Document,
        rows: Vec<Element>,
        selectors: &Selectors,
        classes: Classes,
        capabilities: Capabilities,
    ) -> Self {
        let controls = if capabilities.control_bar {
            ControlBar::locate(document, selectors)
        } else {
            ControlBar::default()
        };

        // Server markup may ship with a row pre-highlighted.
        for row in &rows {
            toggle_class(row, &classes.current, false);
            toggle_class(row, &classes.playing, false);
        }

        Self {
            rows,
            title: query(document, &selectors.title),
            controls,
            classes,
        }
    }

    pub fn rows(&self) -> &[Element] {
        &self.rows
    }

    pub fn title(&self) -> Option<&Element> {
        self.title.as_ref()
    }

    pub fn controls(&self) -> &ControlBar {
        &self.controls
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if class.is_empty() {
        return;
    }
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        tracing::debug!(class, error = ?err, "class toggle failed");
    }
}

fn set_disabled(element: &Element, disabled: bool) {
    if let Err(err) = element.toggle_attribute_with_force("disabled", disabled) {
        tracing::debug!(error = ?err, "disabled toggle failed");
    }
}

impl PlayerView for DomView {
    fn mark_current(&mut self, index: usize, current: bool) {
        if let Some(row) = self.rows.get(index) {
            toggle_class(row, &self.classes.current, current);
        }
    }

    fn mark_playing(&mut self, index: usize, playing: bool) {
        if let Some(row) = self.rows.get(index) {
            toggle_class(row, &self.classes.playing, playing);
        }
        if let Some(button) = &self.controls.play_pause {
            toggle_class(button, &self.classes.playing, playing);
        }
    }

    fn scroll_to(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        row.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn set_title(&mut self, title: &str) {
        if let Some(el) = &self.title {
            el.set_text_content(Some(title));
        }
    }

    fn set_navigation(&mut self, prev_enabled: bool, next_enabled: bool) {
        if let Some(prev) = &self.controls.prev {
            set_disabled(prev, !prev_enabled);
        }
        if let Some(next) = &self.controls.next {
            set_disabled(next, !next_enabled);
        }
    }

    fn set_progress(&mut self, percent: f64) {
        let Some(input) = &self.controls.progress else {
            return;
        };
        let (min, max) = slider_bounds(input);
        let value = min + (max - min) * percent.clamp(0.0, 100.0) / 100.0;
        input.set_value(&format!("{value:.2}"));
    }

    fn set_time(&mut self, elapsed: &str, total: &str) {
        if let Some(el) = &self.controls.elapsed {
            el.set_text_content(Some(elapsed));
        }
        if let Some(el) = &self.controls.total {
            el.set_text_content(Some(total));
        }
    }
}
