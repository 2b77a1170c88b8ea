//! Playlist data read from the page and the state the player mutates.

/// One playable item from the page's track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub index: usize,
    pub url: String,
    pub title: String,
}

impl Track {
    pub fn new(index: usize, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
            title: title.into(),
        }
    }
}

/// In-memory playback state owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerState {
    pub current_track_index: usize,
    pub is_playing: bool,
}

/// Metadata published to the system media surface on each track change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork: Option<String>,
}

impl TrackMetadata {
    pub fn for_track(track: &Track, artwork: Option<&str>) -> Self {
        Self {
            title: track.title.clone(),
            artist: String::new(),
            album: String::new(),
            artwork: artwork.map(str::to_string),
        }
    }
}

/// Commands the OS / lock screen can send through the media session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionAction {
    Play,
    Pause,
    PreviousTrack,
    NextTrack,
    SeekTo(f64),
}

impl SessionAction {
    /// Action names registered with `navigator.mediaSession.setActionHandler`.
    pub const NAMES: [&'static str; 5] = ["play", "pause", "previoustrack", "nexttrack", "seekto"];

    /// Build an action from its media-session name. `seek_time` is only
    /// consulted for `seekto`, which is dropped when no time is supplied.
    pub fn from_name(name: &str, seek_time: Option<f64>) -> Option<Self> {
        match name {
            "play" => Some(Self::Play),
            "pause" => Some(Self::Pause),
            "previoustrack" => Some(Self::PreviousTrack),
            "nexttrack" => Some(Self::NextTrack),
            "seekto" => seek_time
                .filter(|t| t.is_finite())
                .map(|t| Self::SeekTo(t.max(0.0))),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::PreviousTrack => "previoustrack",
            Self::NextTrack => "nexttrack",
            Self::SeekTo(_) => "seekto",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_action_names_resolve() {
        for name in SessionAction::NAMES {
            let action = SessionAction::from_name(name, Some(12.5)).unwrap();
            assert_eq!(action.name(), name);
        }
        assert_eq!(SessionAction::from_name("skipad", None), None);
    }

    #[test]
    fn seekto_requires_a_finite_time() {
        assert_eq!(SessionAction::from_name("seekto", None), None);
        assert_eq!(SessionAction::from_name("seekto", Some(f64::NAN)), None);
        assert_eq!(
            SessionAction::from_name("seekto", Some(-3.0)),
            Some(SessionAction::SeekTo(0.0))
        );
    }

    #[test]
    fn metadata_carries_cover_as_artwork() {
        let track = Track::new(2, "/a/03.mp3", "Third");
        let meta = TrackMetadata::for_track(&track, Some("/a/cover.jpg"));
        assert_eq!(meta.title, "Third");
        assert_eq!(meta.artwork.as_deref(), Some("/a/cover.jpg"));
        assert!(meta.artist.is_empty());
    }
}
