use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

mod api;
mod components;
mod db;
mod diagnostics;
mod player;
mod toast;
mod utils;

use components::AppView;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_ICONS_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css";

fn main() {
    // A second init (e.g. hot reload) keeps the existing subscriber.
    let _ = dioxus::logger::init(Level::INFO);
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#0d6efd" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Title { "Streamify" }

        document::Stylesheet { href: BOOTSTRAP_CSS }
        document::Stylesheet { href: BOOTSTRAP_ICONS_CSS }
        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
