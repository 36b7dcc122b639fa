//! Seams between the player logic and whatever hosts it.

use futures_util::future::LocalBoxFuture;

use super::error::PlaybackError;
use super::state::PlayIcon;
use crate::toast::Severity;

/// Deferred result of asking the media element to start.
pub type PlayFuture = LocalBoxFuture<'static, Result<(), PlaybackError>>;

/// The single audio element.
pub trait MediaBackend {
    /// Whether an element is present at all. Every operation on a detached
    /// backend is a silent no-op.
    fn is_attached(&self) -> bool;
    fn source(&self) -> Option<String>;
    fn set_source(&mut self, src: &str);
    fn clear_source(&mut self);
    fn play(&mut self) -> PlayFuture;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn current_time(&self) -> f64;
    /// Track length in seconds; `NaN` or `0.0` while unknown.
    fn duration(&self) -> f64;
    fn seek(&mut self, seconds: f64);
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
    fn looping(&self) -> bool;
    fn set_looping(&mut self, looping: bool);
}

/// Visible player controls.
pub trait PlayerView {
    fn set_title(&mut self, title: &str);
    fn set_artist(&mut self, artist: &str);
    fn set_thumbnail(&mut self, thumbnail: Option<&str>);
    fn set_visible(&mut self, visible: bool);
    fn set_icon(&mut self, icon: PlayIcon);
    fn set_progress(&mut self, percent: f64);
    fn set_time_labels(&mut self, current: &str, total: &str);
}

/// Transient user notifications.
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}
