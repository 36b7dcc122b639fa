use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The media element refused to start (autoplay policy, bad source, ...).
    #[error("playback start rejected: {0}")]
    Rejected(String),
    /// A newer load or a pause replaced this start before it settled.
    #[error("playback start superseded")]
    Superseded,
    #[error("no audio element attached")]
    Detached,
}
