//! Keyboard shortcuts for the player.

/// What a key press asks the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Next,
    Previous,
    TogglePlay,
}

/// The parts of a `keydown` event the shortcut mapping looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub code: String,
    pub key_code: u32,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
    /// Already handled by someone else, mid IME composition, or aimed at an
    /// editable element.
    pub ignored: bool,
}

impl KeyPress {
    pub fn key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }
}

pub fn shortcut_action(press: &KeyPress) -> Option<ShortcutAction> {
    if press.ignored {
        return None;
    }

    let key = press.key.as_str();
    let code = press.code.as_str();

    if matches!(
        key,
        "MediaTrackNext" | "MediaNextTrack" | "AudioTrackNext" | "AudioNext" | "NextTrack" | "F9"
    ) || code == "MediaTrackNext"
        || press.key_code == 176
    {
        return Some(ShortcutAction::Next);
    }
    if matches!(
        key,
        "MediaTrackPrevious"
            | "MediaPreviousTrack"
            | "AudioTrackPrevious"
            | "AudioPrev"
            | "PreviousTrack"
            | "F7"
    ) || code == "MediaTrackPrevious"
        || press.key_code == 177
    {
        return Some(ShortcutAction::Previous);
    }
    if matches!(key, "MediaPlayPause" | "AudioPlay" | "AudioPause" | "F8")
        || code == "MediaPlayPause"
        || press.key_code == 179
    {
        return Some(ShortcutAction::TogglePlay);
    }

    if (press.meta || press.ctrl) && !press.alt && !press.shift {
        match key {
            "ArrowRight" => return Some(ShortcutAction::Next),
            "ArrowLeft" => return Some(ShortcutAction::Previous),
            _ => {}
        }
    }

    if !press.meta && !press.ctrl && !press.alt && (key == " " || key == "Spacebar" || code == "Space")
    {
        return Some(ShortcutAction::TogglePlay);
    }

    None
}
