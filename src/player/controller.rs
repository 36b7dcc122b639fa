use futures_util::future::{AbortHandle, Abortable};

use super::error::PlaybackError;
use super::ports::{MediaBackend, Notifier, PlayFuture, PlayerView};
use super::state::{format_time, PlayIcon};
use super::track::TrackRef;
use crate::toast::Severity;

/// Identifies one request to start playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTicket(u64);

/// A playback start that has been requested but not yet settled.
///
/// The host drives it with [`PendingPlay::settle`] and hands the outcome back
/// to [`PlayerController::finish_play`]. Starting another track or pausing
/// aborts it.
#[must_use = "a pending play does nothing unless settled"]
pub struct PendingPlay {
    ticket: PlayTicket,
    future: Abortable<PlayFuture>,
}

impl PendingPlay {
    #[cfg(test)]
    pub fn ticket(&self) -> PlayTicket {
        self.ticket
    }

    pub async fn settle(self) -> PlayOutcome {
        let result = match self.future.await {
            Ok(result) => result,
            Err(_aborted) => Err(PlaybackError::Superseded),
        };
        PlayOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    pub ticket: PlayTicket,
    pub result: Result<(), PlaybackError>,
}

/// Owns the transport of one audio element and mirrors it into a view.
pub struct PlayerController<M, V, N> {
    media: M,
    view: V,
    notifier: N,
    is_playing: bool,
    next_ticket: u64,
    inflight: Option<(PlayTicket, AbortHandle)>,
}

impl<M, V, N> PlayerController<M, V, N>
where
    M: MediaBackend,
    V: PlayerView,
    N: Notifier,
{
    pub fn new(media: M, mut view: V, notifier: N) -> Self {
        view.set_icon(PlayIcon::Paused);
        view.set_visible(false);
        Self {
            media,
            view,
            notifier,
            is_playing: false,
            next_ticket: 0,
            inflight: None,
        }
    }

    #[cfg(test)]
    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Load `track`, replacing whatever was loaded, and request playback.
    pub fn play_track(&mut self, track: &TrackRef) -> Option<PendingPlay> {
        if !self.media.is_attached() {
            return None;
        }

        self.media.set_source(&track.src);
        self.view.set_title(track.display_title());
        self.view.set_artist(track.display_artist());
        self.view.set_thumbnail(track.thumbnail.as_deref());
        self.view.set_visible(true);
        tracing::debug!(src = %track.src, "loading track");

        Some(self.request_play())
    }

    /// Apply the outcome of a pending start. Returns whether it changed state.
    pub fn finish_play(&mut self, outcome: PlayOutcome) -> bool {
        let current = matches!(self.inflight, Some((ticket, _)) if ticket == outcome.ticket);
        if current {
            self.inflight = None;
        }

        match outcome.result {
            Ok(()) if current => {
                self.set_playing(true);
                true
            }
            Ok(()) => false,
            Err(PlaybackError::Superseded) => {
                tracing::debug!("playback start superseded");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "Playback failed");
                false
            }
        }
    }

    pub fn toggle_play(&mut self) -> Option<PendingPlay> {
        if !self.media.is_attached() || self.media.source().is_none() {
            return None;
        }

        if self.media.is_paused() {
            let pending = self.request_play();
            self.set_playing(true);
            Some(pending)
        } else {
            self.cancel_inflight();
            self.media.pause();
            self.set_playing(false);
            None
        }
    }

    /// Refresh the progress bar and time labels from the element clock.
    pub fn update_progress(&mut self) {
        let duration = self.media.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let current = self.media.current_time();
        self.view.set_progress(current / duration * 100.0);
        self.view.set_time_labels(&format_time(current), &format_time(duration));
    }

    pub fn on_track_ended(&mut self) {
        self.set_playing(false);
    }

    pub fn close_player(&mut self) {
        self.cancel_inflight();
        if self.media.is_attached() {
            self.media.pause();
            self.media.clear_source();
        }
        self.set_playing(false);
        self.view.set_visible(false);
    }

    pub fn set_volume_percent(&mut self, percent: f64) {
        if !percent.is_finite() || !self.media.is_attached() {
            return;
        }
        self.media.set_volume((percent / 100.0).clamp(0.0, 1.0));
    }

    pub fn seek_percent(&mut self, percent: f64) {
        if !percent.is_finite() || !self.media.is_attached() {
            return;
        }
        let duration = self.media.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        self.media.seek(percent.clamp(0.0, 100.0) / 100.0 * duration);
    }

    pub fn shuffle(&mut self) {
        self.notifier.notify("Shuffle enabled", Severity::Info);
    }

    /// Restart the current track.
    pub fn previous(&mut self) {
        if self.media.is_attached() {
            self.media.seek(0.0);
        }
    }

    pub fn next(&mut self) {
        self.notifier.notify("Next track", Severity::Info);
    }

    /// Flip looping and announce the new mode. Returns the new loop flag.
    pub fn toggle_repeat(&mut self) -> bool {
        if self.media.is_attached() {
            let looping = !self.media.looping();
            self.media.set_looping(looping);
        }
        let looping = self.media.looping();
        let message = if looping { "Repeat on" } else { "Repeat off" };
        self.notifier.notify(message, Severity::Info);
        looping
    }

    fn request_play(&mut self) -> PendingPlay {
        self.cancel_inflight();
        self.next_ticket += 1;
        let ticket = PlayTicket(self.next_ticket);
        let (handle, registration) = AbortHandle::new_pair();
        self.inflight = Some((ticket, handle));
        PendingPlay {
            ticket,
            future: Abortable::new(self.media.play(), registration),
        }
    }

    fn cancel_inflight(&mut self) {
        if let Some((_, handle)) = self.inflight.take() {
            handle.abort();
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        self.view.set_icon(PlayIcon::for_playing(playing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerSurface;
    use futures_util::future::{self, FutureExt};

    #[derive(Default)]
    struct FakeMedia {
        detached: bool,
        src: Option<String>,
        playing: bool,
        time: f64,
        duration: f64,
        volume: f64,
        looping: bool,
        /// `None` leaves every start pending forever.
        play_result: Option<Result<(), PlaybackError>>,
        loads: Vec<String>,
    }

    impl FakeMedia {
        fn resolving(result: Result<(), PlaybackError>) -> Self {
            Self {
                play_result: Some(result),
                volume: 1.0,
                ..Self::default()
            }
        }
    }

    impl MediaBackend for FakeMedia {
        fn is_attached(&self) -> bool {
            !self.detached
        }
        fn source(&self) -> Option<String> {
            self.src.clone()
        }
        fn set_source(&mut self, src: &str) {
            self.src = Some(src.to_string());
            self.loads.push(src.to_string());
            self.time = 0.0;
            self.playing = false;
        }
        fn clear_source(&mut self) {
            self.src = None;
        }
        fn play(&mut self) -> PlayFuture {
            self.playing = true;
            match self.play_result.clone() {
                Some(result) => future::ready(result).boxed_local(),
                None => future::pending().boxed_local(),
            }
        }
        fn pause(&mut self) {
            self.playing = false;
        }
        fn is_paused(&self) -> bool {
            !self.playing
        }
        fn current_time(&self) -> f64 {
            self.time
        }
        fn duration(&self) -> f64 {
            self.duration
        }
        fn seek(&mut self, seconds: f64) {
            self.time = seconds;
        }
        fn volume(&self) -> f64 {
            self.volume
        }
        fn set_volume(&mut self, volume: f64) {
            self.volume = volume;
        }
        fn looping(&self) -> bool {
            self.looping
        }
        fn set_looping(&mut self, looping: bool) {
            self.looping = looping;
        }
    }

    #[derive(Default)]
    struct Recorded(Vec<(String, Severity)>);

    impl Notifier for Recorded {
        fn notify(&mut self, message: &str, severity: Severity) {
            self.0.push((message.to_string(), severity));
        }
    }

    type TestController = PlayerController<FakeMedia, PlayerSurface, Recorded>;

    fn controller(media: FakeMedia) -> TestController {
        PlayerController::new(media, PlayerSurface::default(), Recorded::default())
    }

    fn settle(pending: PendingPlay) -> PlayOutcome {
        pending
            .settle()
            .now_or_never()
            .expect("pending play should be ready")
    }

    #[test]
    fn starts_paused_and_hidden() {
        let player = controller(FakeMedia::resolving(Ok(())));
        assert!(!player.is_playing());
        assert!(!player.view().visible);
        assert_eq!(player.view().icon, PlayIcon::Paused);
    }

    #[test]
    fn play_track_fills_view_and_flips_state_on_success() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let track = TrackRef::new("/media/a.mp3")
            .with_title("Song")
            .with_artist("Band")
            .with_thumbnail("/media/a.jpg");

        let pending = player.play_track(&track).unwrap();
        assert!(!player.is_playing());
        assert!(player.view().visible);
        assert_eq!(player.view().title, "Song");
        assert_eq!(player.view().artist, "Band");
        assert_eq!(player.view().thumbnail.as_deref(), Some("/media/a.jpg"));

        assert!(player.finish_play(settle(pending)));
        assert!(player.is_playing());
        assert_eq!(player.view().icon, PlayIcon::Playing);
    }

    #[test]
    fn play_track_without_metadata_uses_fallbacks_and_hides_thumbnail() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let first = TrackRef::new("/a.mp3").with_thumbnail("/a.jpg");
        let _ = player.play_track(&first);
        let _ = player.play_track(&TrackRef::new("/b.mp3"));
        assert_eq!(player.view().title, "Unknown Title");
        assert_eq!(player.view().artist, "Unknown Artist");
        assert_eq!(player.view().thumbnail, None);
    }

    #[test]
    fn rejected_start_is_ignored() {
        let mut player = controller(FakeMedia::resolving(Err(PlaybackError::Rejected(
            "NotAllowedError".into(),
        ))));
        let pending = player.play_track(&TrackRef::new("/a.mp3")).unwrap();
        assert!(!player.finish_play(settle(pending)));
        assert!(!player.is_playing());
        assert_eq!(player.view().icon, PlayIcon::Paused);
        assert!(player.notifier().0.is_empty());
    }

    #[test]
    fn new_track_replaces_previous_and_stale_start_is_dropped() {
        let mut player = controller(FakeMedia::default());
        let first = player.play_track(&TrackRef::new("/a.mp3")).unwrap();
        let second = player.play_track(&TrackRef::new("/b.mp3")).unwrap();

        assert_eq!(player.media().source().as_deref(), Some("/b.mp3"));
        assert_eq!(player.media().loads, vec!["/a.mp3", "/b.mp3"]);

        let stale = settle(first);
        assert_eq!(stale.result, Err(PlaybackError::Superseded));
        assert!(!player.finish_play(stale));

        // a late success for the old ticket must not count either
        assert!(!player.finish_play(PlayOutcome {
            ticket: PlayTicket(1),
            result: Ok(()),
        }));
        assert!(!player.is_playing());

        assert!(player.finish_play(PlayOutcome {
            ticket: second.ticket(),
            result: Ok(()),
        }));
        assert!(player.is_playing());
    }

    #[test]
    fn detached_media_makes_play_track_a_no_op() {
        let mut player = controller(FakeMedia {
            detached: true,
            ..FakeMedia::default()
        });
        assert!(player.play_track(&TrackRef::new("/a.mp3")).is_none());
        assert!(!player.view().visible);
        assert_eq!(player.media().source(), None);
    }

    #[test]
    fn toggle_without_source_is_a_no_op() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        assert!(player.toggle_play().is_none());
        assert!(!player.is_playing());
        assert_eq!(player.view().icon, PlayIcon::Paused);
    }

    #[test]
    fn toggle_flips_between_playing_and_paused() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let pending = player.play_track(&TrackRef::new("/a.mp3")).unwrap();
        player.finish_play(settle(pending));

        assert!(player.toggle_play().is_none());
        assert!(!player.is_playing());
        assert!(player.media().is_paused());
        assert_eq!(player.view().icon, PlayIcon::Paused);

        let resumed = player.toggle_play().unwrap();
        assert!(player.is_playing());
        assert_eq!(player.view().icon, PlayIcon::Playing);
        assert!(player.finish_play(settle(resumed)));
    }

    #[test]
    fn pausing_aborts_a_pending_start() {
        let mut player = controller(FakeMedia::default());
        let pending = player.play_track(&TrackRef::new("/a.mp3")).unwrap();
        let ticket = pending.ticket();
        // the element reports playing as soon as play() is requested
        assert!(player.toggle_play().is_none());

        assert!(!player.finish_play(settle(pending)));
        assert!(!player.finish_play(PlayOutcome {
            ticket,
            result: Ok(()),
        }));
        assert!(!player.is_playing());
    }

    #[test]
    fn progress_tracks_clock_and_ignores_unknown_duration() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let _ = player.play_track(&TrackRef::new("/a.mp3"));

        player.media_mut().time = 5.0;
        player.update_progress();
        assert_eq!(player.view().progress, 0.0);
        assert_eq!(player.view().current_label, "0:00");

        player.media_mut().duration = f64::NAN;
        player.update_progress();
        assert_eq!(player.view().progress, 0.0);

        player.media_mut().duration = 200.0;
        player.media_mut().time = 50.0;
        player.update_progress();
        assert_eq!(player.view().progress, 25.0);
        assert_eq!(player.view().current_label, "0:50");
        assert_eq!(player.view().total_label, "3:20");
    }

    #[test]
    fn ended_resets_icon_without_advancing() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let pending = player.play_track(&TrackRef::new("/a.mp3")).unwrap();
        player.finish_play(settle(pending));

        player.on_track_ended();
        assert!(!player.is_playing());
        assert_eq!(player.view().icon.glyph(), "bi bi-play-fill");
        assert_eq!(player.media().loads, vec!["/a.mp3"]);
    }

    #[test]
    fn close_pauses_clears_and_hides() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let pending = player.play_track(&TrackRef::new("/a.mp3")).unwrap();
        player.finish_play(settle(pending));

        player.close_player();
        assert!(player.media().is_paused());
        assert_eq!(player.media().source(), None);
        assert!(!player.view().visible);
        assert!(!player.is_playing());
        assert!(player.toggle_play().is_none());
    }

    #[test]
    fn volume_and_seek_inputs_scale_percentages() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        player.set_volume_percent(50.0);
        assert_eq!(player.media().volume(), 0.5);

        player.seek_percent(50.0);
        assert_eq!(player.media().current_time(), 0.0);

        player.media_mut().duration = 180.0;
        player.seek_percent(50.0);
        assert_eq!(player.media().current_time(), 90.0);

        player.set_volume_percent(140.0);
        assert_eq!(player.media().volume(), 1.0);
    }

    #[test]
    fn transport_placeholders_announce_themselves() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let _ = player.play_track(&TrackRef::new("/a.mp3"));
        player.media_mut().time = 42.0;

        player.shuffle();
        player.previous();
        player.next();
        assert!(player.toggle_repeat());
        assert!(!player.toggle_repeat());

        assert_eq!(player.media().current_time(), 0.0);
        let messages: Vec<&str> = player
            .notifier()
            .0
            .iter()
            .map(|(message, _)| message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["Shuffle enabled", "Next track", "Repeat on", "Repeat off"]
        );
        assert!(player.notifier().0.iter().all(|(_, s)| *s == Severity::Info));
    }

    #[test]
    fn transport_changes_reach_the_element() {
        let mut player = controller(FakeMedia::resolving(Ok(())));
        let _ = player.play_track(&TrackRef::new("/a.mp3"));
        player.media_mut().duration = 10.0;
        player.set_volume_percent(25.0);

        let media = player.media();
        assert_eq!(media.source().as_deref(), Some("/a.mp3"));
        assert_eq!(media.volume(), 0.25);
        assert_eq!(media.duration(), 10.0);
        assert!(!media.looping());
        assert!(!player.is_playing());
    }
}
