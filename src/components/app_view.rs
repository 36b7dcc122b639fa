//! Routes of the application.

use crate::components::views::{GenreView, Library};
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        Library {},
        #[route("/genre/:slug")]
        GenreView { slug: String },
}
