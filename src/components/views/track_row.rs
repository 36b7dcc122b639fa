use crate::api::Content;
use crate::components::PlayerHandle;
use dioxus::prelude::*;

/// One catalog entry with its play control.
#[component]
pub fn TrackRow(content: Content) -> Element {
    let player = use_context::<PlayerHandle>();
    let track = content.track();
    let playable = track.is_some();
    let artist = if content.artist_name.trim().is_empty() {
        "Unknown Artist".to_string()
    } else {
        content.artist_name.clone()
    };
    let duration = content.duration_label();

    let on_play = move |evt: MouseEvent| {
        evt.prevent_default();
        evt.stop_propagation();
        if let Some(track) = track.as_ref() {
            player.play_track(track);
        }
    };

    rsx! {
        li { class: "list-group-item list-group-item-dark d-flex align-items-center gap-3 track-row",
            {
                match &content.thumbnail {
                    Some(url) => rsx! {
                        img {
                            src: "{url}",
                            alt: "{content.title}",
                            class: "rounded track-thumb",
                            loading: "lazy",
                        }
                    },
                    None => rsx! {
                        div { class: "rounded track-thumb d-flex align-items-center justify-content-center bg-secondary",
                            i { class: "bi bi-music-note-beamed" }
                        }
                    },
                }
            }
            div { class: "flex-grow-1 min-w-0",
                div { class: "fw-semibold text-truncate",
                    "{content.title}"
                    if content.is_premium {
                        span { class: "badge text-bg-warning ms-2", "Premium" }
                    }
                }
                div { class: "small text-secondary text-truncate", "{artist}" }
            }
            span { class: "small text-secondary font-monospace", "{duration}" }
            button {
                r#type: "button",
                class: "btn btn-sm btn-primary rounded-circle track-play",
                disabled: !playable,
                aria_label: "Play {content.title}",
                onclick: on_play,
                i { class: "bi bi-play-fill" }
            }
        }
    }
}
