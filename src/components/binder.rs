//! Host-page integration: play controls rendered outside the app and flash alerts.

use crate::components::PlayerHandle;

#[cfg(target_arch = "wasm32")]
use crate::components::sleep_ms;
#[cfg(any(target_arch = "wasm32", test))]
use crate::player::TrackRef;
#[cfg(target_arch = "wasm32")]
use crate::toast::{should_auto_dismiss, ALERT_SELECTOR};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{spawn_forever, Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, Element, MouseEvent};

#[cfg(target_arch = "wasm32")]
pub const PLAY_BUTTON_SELECTOR: &str = ".play-btn";

/// Bootstrap's fade transition length.
#[cfg(target_arch = "wasm32")]
const ALERT_FADE_MS: u32 = 150;

/// What a click asks of the player.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Debug, Clone, PartialEq)]
pub enum PlayClick {
    /// The click landed outside every play control.
    Ignored,
    /// A play control without a usable `data-src`.
    Unplayable,
    Play(TrackRef),
}

/// Walk from the click target outwards and stop at the first play control.
///
/// `ancestry` yields the target first, then each parent, the same order
/// `Element::closest` checks.
#[cfg(any(target_arch = "wasm32", test))]
pub fn resolve_play_click<E>(
    ancestry: impl IntoIterator<Item = E>,
    is_control: impl Fn(&E) -> bool,
    attribute: impl Fn(&E, &str) -> Option<String>,
) -> PlayClick {
    let Some(control) = ancestry.into_iter().find(|el| is_control(el)) else {
        return PlayClick::Ignored;
    };
    match TrackRef::from_attributes(|name| attribute(&control, name)) {
        Some(track) => PlayClick::Play(track),
        None => PlayClick::Unplayable,
    }
}

/// Route clicks on `.play-btn` controls to the player.
///
/// A single listener on the document handles every control, including ones
/// inserted after this runs. It listens in the capture phase so the click is
/// stopped before the control or any of its ancestors handles it.
#[cfg(target_arch = "wasm32")]
pub fn bind_play_buttons(player: PlayerHandle) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let runtime = Runtime::current();

    let click_cb = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let click = resolve_play_click(
            std::iter::successors(Some(target), |el| el.parent_element()),
            |el| el.matches(PLAY_BUTTON_SELECTOR).unwrap_or(false),
            |el, name| el.get_attribute(name),
        );
        if click == PlayClick::Ignored {
            return;
        }

        event.prevent_default();
        event.stop_propagation();

        if let PlayClick::Play(track) = click {
            let _guard = RuntimeGuard::new(runtime.clone());
            player.play_track(&track);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = document.add_event_listener_with_callback_and_bool(
        "click",
        click_cb.as_ref().unchecked_ref(),
        true,
    );
    click_cb.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn bind_play_buttons(_player: PlayerHandle) {}

/// Close every dismissible flash alert once, `delay_ms` after load.
#[cfg(target_arch = "wasm32")]
pub fn schedule_alert_sweep(delay_ms: u32) {
    spawn_forever(async move {
        sleep_ms(delay_ms).await;

        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(nodes) = document.query_selector_all(ALERT_SELECTOR) else {
            return;
        };

        let mut closing = Vec::new();
        for idx in 0..nodes.length() {
            let Some(alert) = nodes.item(idx).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if should_auto_dismiss(&alert.class_name()) {
                let _ = alert.class_list().remove_1("show");
                closing.push(alert);
            }
        }
        if closing.is_empty() {
            return;
        }
        tracing::debug!(count = closing.len(), "closing flash alerts");

        if closing.iter().any(|alert| alert.class_list().contains("fade")) {
            sleep_ms(ALERT_FADE_MS).await;
        }
        for alert in closing {
            alert.remove();
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn schedule_alert_sweep(_delay_ms: u32) {}
