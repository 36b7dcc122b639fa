use crate::player::Notifier;
use crate::toast::{Severity, ToastStack, TOAST_CONTAINER_ID};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

pub(crate) async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

/// Shows toasts and removes each one after its lifetime.
#[derive(Clone, Copy)]
pub struct Toaster {
    stack: Signal<ToastStack>,
    lifetime_ms: u32,
}

impl Toaster {
    pub fn new(stack: Signal<ToastStack>, lifetime_ms: u32) -> Self {
        Self { stack, lifetime_ms }
    }

    pub fn show(&self, message: &str, severity: Severity) -> u64 {
        let mut stack = self.stack;
        let id = stack.write().push(message, severity);

        // Removal is unconditional; a toast dismissed by hand is simply gone already.
        let lifetime_ms = self.lifetime_ms;
        spawn_forever(async move {
            sleep_ms(lifetime_ms).await;
            stack.write().remove(id);
        });
        id
    }

    pub fn dismiss(&self, id: u64) {
        let mut stack = self.stack;
        stack.write().remove(id);
    }
}

impl Notifier for Toaster {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.show(message, severity);
    }
}

#[component]
pub fn ToastContainer() -> Element {
    let stack = use_context::<Signal<ToastStack>>();
    let toaster = use_context::<Toaster>();
    let stack = stack();

    if !stack.has_container() {
        return rsx! {};
    }

    rsx! {
        div {
            id: TOAST_CONTAINER_ID,
            class: "position-fixed bottom-0 start-50 translate-middle-x mb-5 p-3",
            style: "z-index: 9999;",
            for toast in stack.toasts().iter().cloned() {
                div {
                    key: "{toast.id}",
                    class: toast.severity.toast_class(),
                    role: "alert",
                    div { class: "d-flex",
                        div { class: "toast-body", "{toast.message}" }
                        button {
                            r#type: "button",
                            class: "btn-close btn-close-white me-2 m-auto",
                            aria_label: "Close",
                            onclick: move |_| toaster.dismiss(toast.id),
                        }
                    }
                }
            }
        }
    }
}
