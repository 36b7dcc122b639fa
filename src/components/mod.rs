//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod audio_manager;
mod binder;
mod player;
mod toast;
mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::*;
pub use binder::*;
pub use player::*;
pub use toast::*;
// Views are accessed via views::ViewName

/// Drive a virtual DOM's tasks and renders until `ms` have passed.
#[cfg(test)]
pub(crate) async fn run_for(dom: &mut dioxus::core::VirtualDom, ms: u64) {
    use dioxus::core::NoOpMutations;
    use std::time::Duration;

    let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
    loop {
        let woke = tokio::select! {
            _ = dom.wait_for_work() => true,
            _ = tokio::time::sleep_until(deadline) => false,
        };
        if !woke {
            break;
        }
        dom.render_immediate(&mut NoOpMutations);
    }
}
