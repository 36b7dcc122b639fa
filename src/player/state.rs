use serde::{Deserialize, Serialize};

use super::ports::PlayerView;

/// Play/pause icon shown on the transport button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayIcon {
    #[default]
    Paused,
    Playing,
}

impl PlayIcon {
    /// Icon-font classes for the glyph. A paused player offers "play".
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Paused => "bi bi-play-fill",
            PlayIcon::Playing => "bi bi-pause-fill",
        }
    }

    pub fn for_playing(playing: bool) -> Self {
        if playing {
            PlayIcon::Playing
        } else {
            PlayIcon::Paused
        }
    }
}

/// Everything the player bar displays.
///
/// Doubles as an in-memory `PlayerView`: the web front-end keeps one inside a
/// signal and renders from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSurface {
    pub visible: bool,
    pub title: String,
    pub artist: String,
    pub thumbnail: Option<String>,
    pub icon: PlayIcon,
    pub progress: f64,
    pub current_label: String,
    pub total_label: String,
}

impl Default for PlayerSurface {
    fn default() -> Self {
        Self {
            visible: false,
            title: String::new(),
            artist: String::new(),
            thumbnail: None,
            icon: PlayIcon::Paused,
            progress: 0.0,
            current_label: format_time(0.0),
            total_label: format_time(0.0),
        }
    }
}

impl PlayerView for PlayerSurface {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_artist(&mut self, artist: &str) {
        self.artist = artist.to_string();
    }

    fn set_thumbnail(&mut self, thumbnail: Option<&str>) {
        self.thumbnail = thumbnail.map(str::to_string);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_icon(&mut self, icon: PlayIcon) {
        self.icon = icon;
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent;
    }

    fn set_time_labels(&mut self, current: &str, total: &str) {
        self.current_label = current.to_string();
        self.total_label = total.to_string();
    }
}

/// Format seconds as `m:ss`, truncating fractional seconds.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.trunc() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
