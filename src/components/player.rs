use crate::components::PlayerHandle;
use crate::db::{save_settings, PlayerSettings};
use crate::player::{PlayIcon, PlayerSurface, PlayerView};
use dioxus::prelude::*;

/// `PlayerView` that renders through a signal.
#[derive(Clone, Copy)]
pub struct SurfaceView(pub Signal<PlayerSurface>);

impl PlayerView for SurfaceView {
    fn set_title(&mut self, title: &str) {
        self.0.write().set_title(title);
    }

    fn set_artist(&mut self, artist: &str) {
        self.0.write().set_artist(artist);
    }

    fn set_thumbnail(&mut self, thumbnail: Option<&str>) {
        self.0.write().set_thumbnail(thumbnail);
    }

    fn set_visible(&mut self, visible: bool) {
        if self.0.peek().visible != visible {
            self.0.write().set_visible(visible);
        }
    }

    fn set_icon(&mut self, icon: PlayIcon) {
        if self.0.peek().icon != icon {
            self.0.write().set_icon(icon);
        }
    }

    fn set_progress(&mut self, percent: f64) {
        self.0.write().set_progress(percent);
    }

    fn set_time_labels(&mut self, current: &str, total: &str) {
        let unchanged = {
            let surface = self.0.peek();
            surface.current_label == current && surface.total_label == total
        };
        if !unchanged {
            self.0.write().set_time_labels(current, total);
        }
    }
}

fn persist(settings: &PlayerSettings) {
    if let Err(err) = save_settings(settings) {
        tracing::warn!(error = %err, "could not save player settings");
    }
}

#[component]
pub fn Player() -> Element {
    let player = use_context::<PlayerHandle>();
    let surface = use_context::<Signal<PlayerSurface>>();
    let mut settings = use_context::<Signal<PlayerSettings>>();

    let view = surface();
    let volume_percent = settings().volume_percent();
    let repeat_on = settings().repeat;

    let on_volume_input = move |e: Event<FormData>| {
        if let Ok(val) = e.value().parse::<f64>() {
            player.update(|p| p.set_volume_percent(val));
            settings.write().volume = (val / 100.0).clamp(0.0, 1.0);
            persist(&settings.peek());
        }
    };

    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            player.update(|p| p.seek_percent(percent));
        }
    };

    let on_repeat = move |_| {
        let looping = player.update(|p| p.toggle_repeat());
        settings.write().repeat = looping;
        persist(&settings.peek());
    };

    let thumb_style = if view.thumbnail.is_some() {
        ""
    } else {
        "display: none;"
    };

    rsx! {
        div {
            id: "music-player",
            class: if view.visible { "music-player fixed-bottom bg-dark text-white border-top border-secondary" } else { "music-player fixed-bottom bg-dark text-white border-top border-secondary d-none" },
            div { class: "container-fluid d-flex flex-wrap align-items-center gap-3 py-2",
                // Now playing
                div { class: "d-flex align-items-center gap-2 player-track",
                    img {
                        id: "player-thumb",
                        class: "rounded player-thumb",
                        src: view.thumbnail.clone().unwrap_or_default(),
                        style: thumb_style,
                        alt: "",
                    }
                    div { class: "d-flex flex-column text-truncate",
                        span { id: "player-title", class: "fw-semibold text-truncate", "{view.title}" }
                        span { id: "player-artist", class: "small text-secondary text-truncate", "{view.artist}" }
                    }
                }

                // Transport
                div { class: "d-flex align-items-center gap-2 player-transport",
                    button {
                        id: "shuffle-btn",
                        r#type: "button",
                        class: "btn btn-link text-white p-1",
                        aria_label: "Shuffle",
                        onclick: move |_| player.update(|p| p.shuffle()),
                        i { class: "bi bi-shuffle" }
                    }
                    button {
                        id: "prev-btn",
                        r#type: "button",
                        class: "btn btn-link text-white p-1",
                        aria_label: "Previous",
                        onclick: move |_| player.update(|p| p.previous()),
                        i { class: "bi bi-skip-start-fill" }
                    }
                    button {
                        id: "play-pause-btn",
                        r#type: "button",
                        class: "btn btn-light rounded-circle play-toggle",
                        aria_label: "Play or pause",
                        onclick: move |_| player.toggle_play(),
                        i { id: "play-icon", class: view.icon.glyph() }
                    }
                    button {
                        id: "next-btn",
                        r#type: "button",
                        class: "btn btn-link text-white p-1",
                        aria_label: "Next",
                        onclick: move |_| player.update(|p| p.next()),
                        i { class: "bi bi-skip-end-fill" }
                    }
                    button {
                        id: "repeat-btn",
                        r#type: "button",
                        class: if repeat_on { "btn btn-link text-success p-1" } else { "btn btn-link text-white p-1" },
                        aria_label: "Repeat",
                        onclick: on_repeat,
                        i { class: "bi bi-repeat" }
                    }
                }

                // Progress
                div { class: "d-flex align-items-center gap-2 flex-grow-1 player-progress",
                    span { id: "current-time", class: "small font-monospace", "{view.current_label}" }
                    input {
                        id: "progress-bar",
                        r#type: "range",
                        class: "form-range flex-grow-1",
                        min: "0",
                        max: "100",
                        step: "0.1",
                        value: "{view.progress}",
                        oninput: on_seek_input,
                    }
                    span { id: "total-time", class: "small font-monospace", "{view.total_label}" }
                }

                // Volume
                div { class: "d-flex align-items-center gap-2 player-volume",
                    i { class: "bi bi-volume-up" }
                    input {
                        id: "volume-bar",
                        r#type: "range",
                        class: "form-range",
                        min: "0",
                        max: "100",
                        value: "{volume_percent}",
                        oninput: on_volume_input,
                    }
                }

                button {
                    id: "close-player-btn",
                    r#type: "button",
                    class: "btn-close btn-close-white",
                    aria_label: "Close player",
                    onclick: move |_| player.update(|p| p.close_player()),
                }
            }
        }
    }
}
