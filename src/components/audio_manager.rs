//! Audio Manager - binds the player controller to the page's single audio element.
//! Element events are wired once; playback starts settle on a root-scoped task.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::components::{SurfaceView, Toaster};
use crate::player::*;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use futures_util::future::{self, FutureExt};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[cfg(target_arch = "wasm32")]
pub const AUDIO_ELEMENT_ID: &str = "audio-element";

pub type WebPlayer = PlayerController<WebAudio, SurfaceView, Toaster>;

/// Find the page's audio element, creating a hidden one when the host page has none.
#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
fn describe_js_error(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    js_sys::Reflect::get(err, &"name".into())
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

/// `MediaBackend` over an `HtmlAudioElement`.
pub struct WebAudio {
    #[cfg(target_arch = "wasm32")]
    element: Option<HtmlAudioElement>,
}

#[cfg(target_arch = "wasm32")]
impl WebAudio {
    pub fn attach() -> Self {
        Self {
            element: get_or_create_audio_element(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaBackend for WebAudio {
    fn is_attached(&self) -> bool {
        self.element.is_some()
    }

    fn source(&self) -> Option<String> {
        // The `src` property resolves "" to the page URL, so read the attribute.
        self.element
            .as_ref()?
            .get_attribute("src")
            .filter(|src| !src.is_empty())
    }

    fn set_source(&mut self, src: &str) {
        if let Some(audio) = &self.element {
            audio.set_src(src);
        }
    }

    fn clear_source(&mut self) {
        if let Some(audio) = &self.element {
            let _ = audio.remove_attribute("src");
            audio.load();
        }
    }

    fn play(&mut self) -> PlayFuture {
        let Some(audio) = &self.element else {
            return future::ready(Err(PlaybackError::Detached)).boxed_local();
        };
        match audio.play() {
            Ok(promise) => async move {
                wasm_bindgen_futures::JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| PlaybackError::Rejected(describe_js_error(&err)))
            }
            .boxed_local(),
            Err(err) => {
                future::ready(Err(PlaybackError::Rejected(describe_js_error(&err)))).boxed_local()
            }
        }
    }

    fn pause(&mut self) {
        if let Some(audio) = &self.element {
            let _ = audio.pause();
        }
    }

    fn is_paused(&self) -> bool {
        self.element.as_ref().map(|a| a.paused()).unwrap_or(true)
    }

    fn current_time(&self) -> f64 {
        self.element.as_ref().map(|a| a.current_time()).unwrap_or(0.0)
    }

    fn duration(&self) -> f64 {
        self.element.as_ref().map(|a| a.duration()).unwrap_or(f64::NAN)
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(audio) = &self.element {
            audio.set_current_time(seconds);
        }
    }

    fn volume(&self) -> f64 {
        self.element.as_ref().map(|a| a.volume()).unwrap_or(1.0)
    }

    fn set_volume(&mut self, volume: f64) {
        if let Some(audio) = &self.element {
            audio.set_volume(volume);
        }
    }

    fn looping(&self) -> bool {
        self.element.as_ref().map(|a| a.loop_()).unwrap_or(false)
    }

    fn set_looping(&mut self, looping: bool) {
        if let Some(audio) = &self.element {
            audio.set_loop(looping);
        }
    }
}

/// Native targets have no page audio element; every transport call is a no-op.
#[cfg(not(target_arch = "wasm32"))]
impl WebAudio {
    pub fn attach() -> Self {
        Self {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaBackend for WebAudio {
    fn is_attached(&self) -> bool {
        false
    }
    fn source(&self) -> Option<String> {
        None
    }
    fn set_source(&mut self, _src: &str) {}
    fn clear_source(&mut self) {}
    fn play(&mut self) -> PlayFuture {
        Box::pin(std::future::ready(Err(PlaybackError::Detached)))
    }
    fn pause(&mut self) {}
    fn is_paused(&self) -> bool {
        true
    }
    fn current_time(&self) -> f64 {
        0.0
    }
    fn duration(&self) -> f64 {
        f64::NAN
    }
    fn seek(&mut self, _seconds: f64) {}
    fn volume(&self) -> f64 {
        1.0
    }
    fn set_volume(&mut self, _volume: f64) {}
    fn looping(&self) -> bool {
        false
    }
    fn set_looping(&mut self, _looping: bool) {}
}

/// Shared handle to the page's player controller.
#[derive(Clone, Copy)]
pub struct PlayerHandle(Signal<WebPlayer>);

impl PlayerHandle {
    pub fn new(player: Signal<WebPlayer>) -> Self {
        Self(player)
    }

    pub fn play_track(mut self, track: &TrackRef) {
        let pending = self.0.write().play_track(track);
        self.drive(pending);
    }

    pub fn toggle_play(mut self) {
        let pending = self.0.write().toggle_play();
        self.drive(pending);
    }

    /// Run a synchronous controller operation.
    pub fn update<R>(mut self, f: impl FnOnce(&mut WebPlayer) -> R) -> R {
        f(&mut self.0.write())
    }

    /// Settle a start off the render path. Callers never wait on it.
    fn drive(self, pending: Option<PendingPlay>) {
        let Some(pending) = pending else {
            return;
        };
        let mut player = self.0;
        spawn_forever(async move {
            let outcome = pending.settle().await;
            player.write().finish_play(outcome);
        });
    }
}

/// Wires the audio element's `timeupdate` and `ended` events to the controller.
#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let player = use_context::<PlayerHandle>();

    use_hook(move || {
        let Some(audio) = get_or_create_audio_element() else {
            return;
        };
        let runtime = Runtime::current();

        let time_closure = {
            let runtime = runtime.clone();
            Closure::wrap(Box::new(move || {
                let _guard = RuntimeGuard::new(runtime.clone());
                player.update(|p| p.update_progress());
            }) as Box<dyn FnMut()>)
        };
        audio.set_ontimeupdate(Some(time_closure.as_ref().unchecked_ref()));
        time_closure.forget();

        let end_closure = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime.clone());
            player.update(|p| p.on_track_ended());
        }) as Box<dyn FnMut()>);
        audio.set_onended(Some(end_closure.as_ref().unchecked_ref()));
        end_closure.forget();
    });

    rsx! {}
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    rsx! {}
}
