use crate::components::{
    bind_play_buttons, schedule_alert_sweep, AppView, AudioController, Player, PlayerHandle,
    SurfaceView, ToastContainer, Toaster, WebAudio,
};
use crate::db::load_settings;
use crate::player::{MediaBackend, PlayerController, PlayerSurface};
use crate::toast::ToastStack;
use dioxus::prelude::*;

#[component]
pub fn AppShell() -> Element {
    let settings = use_signal(load_settings);
    let surface = use_signal(PlayerSurface::default);
    let toasts = use_signal(ToastStack::new);
    let toaster = use_hook(|| Toaster::new(toasts, settings.peek().toast_duration_ms));

    let controller = use_signal(move || {
        let initial = settings.peek().clone();
        let mut player =
            PlayerController::new(WebAudio::attach(), SurfaceView(surface), toaster);
        player.set_volume_percent(initial.volume_percent());
        if initial.repeat {
            player.media_mut().set_looping(true);
        }
        player
    });
    let player = PlayerHandle::new(controller);

    // Provide state via context
    use_context_provider(|| settings);
    use_context_provider(|| surface);
    use_context_provider(|| toasts);
    use_context_provider(|| toaster);
    use_context_provider(|| player);

    // Host-page wiring runs once per page.
    use_hook(move || {
        bind_play_buttons(player);
        schedule_alert_sweep(settings.peek().alert_dismiss_delay_ms);
    });

    rsx! {
        div { class: "app-container d-flex flex-column min-vh-100 bg-black text-white",
            nav { class: "navbar navbar-dark bg-dark border-bottom border-secondary",
                div { class: "container",
                    Link { to: AppView::Library {}, class: "navbar-brand fw-bold",
                        i { class: "bi bi-music-note-list me-2" }
                        "Streamify"
                    }
                }
            }

            // Main scrollable content
            main { class: "container flex-grow-1 py-4 main-scroll",
                Outlet::<AppView> {}
            }

            // Fixed bottom player
            Player {}

            ToastContainer {}
        }

        // Audio controller - element events feed the player controller
        AudioController {}
    }
}

