use crate::api::*;
use crate::components::views::TrackRow;
use crate::components::AppView;
use crate::db::PlayerSettings;
use dioxus::prelude::*;

fn collect_genres(items: &[Content]) -> Vec<Genre> {
    let mut genres: Vec<Genre> = Vec::new();
    for genre in items.iter().flat_map(|item| item.genre.iter()) {
        if !genres.iter().any(|g| g.slug == genre.slug) {
            genres.push(genre.clone());
        }
    }
    genres.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    genres
}

/// The catalog origin, isolated from the rest of the player settings so that
/// volume and repeat changes do not re-run catalog requests.
fn use_catalog_base_url(settings: Signal<PlayerSettings>) -> Memo<String> {
    use_memo(move || settings.read().api_base_url.clone())
}

#[component]
pub fn Library() -> Element {
    rsx! {
        ContentList { genre: None }
    }
}

#[component]
pub fn GenreView(slug: String) -> Element {
    rsx! {
        ContentList { key: "{slug}", genre: Some(slug.clone()) }
    }
}

#[component]
fn ContentList(genre: Option<String>) -> Element {
    let settings = use_context::<Signal<PlayerSettings>>();
    let mut search = use_signal(String::new);
    let mut ordering = use_signal(ContentOrdering::default);
    let catalog_base_url = use_catalog_base_url(settings);
    let genre_for_query = genre.clone();

    let content = use_resource(move || {
        let base_url = catalog_base_url();
        let mut query = ContentQuery::audio().with_ordering(ordering());
        if let Some(slug) = genre_for_query.clone() {
            query = query.with_genre(slug);
        }
        let term = search();
        if !term.trim().is_empty() {
            query = query.with_search(term);
        }
        async move {
            let client = StreamifyClient::new(base_url);
            client.list_content(&query).await.map_err(|err| {
                tracing::warn!(error = %err, "catalog request failed");
                err.to_string()
            })
        }
    });

    let heading = match &genre {
        Some(slug) => format!("Genre: {slug}"),
        None => "All tracks".to_string(),
    };

    rsx! {
        section { class: "library",
            div { class: "d-flex flex-wrap align-items-center justify-content-between gap-3 mb-3",
                h1 { class: "h4 mb-0", "{heading}" }
                div { class: "d-flex gap-2",
                    input {
                        r#type: "search",
                        class: "form-control form-control-sm",
                        placeholder: "Search title, artist or album",
                        value: "{search}",
                        oninput: move |e| search.set(e.value()),
                    }
                    select {
                        class: "form-select form-select-sm",
                        onchange: move |e| {
                            let next = match e.value().as_str() {
                                "popular" => ContentOrdering::MostViewed,
                                "title" => ContentOrdering::Title,
                                _ => ContentOrdering::Newest,
                            };
                            ordering.set(next);
                        },
                        option { value: "newest", "Newest" }
                        option { value: "popular", "Most played" }
                        option { value: "title", "Title" }
                    }
                }
            }

            {
                match &*content.read_unchecked() {
                    Some(Ok(items)) => {
                        let genres = collect_genres(items);
                        rsx! {
                            if !genres.is_empty() {
                                div { class: "d-flex flex-wrap gap-2 mb-3",
                                    Link {
                                        to: AppView::Library {},
                                        class: if genre.is_none() { "badge rounded-pill text-bg-primary text-decoration-none" } else { "badge rounded-pill text-bg-secondary text-decoration-none" },
                                        "All"
                                    }
                                    for g in genres {
                                        Link {
                                            key: "{g.slug}",
                                            to: AppView::GenreView { slug: g.slug.clone() },
                                            class: if genre.as_deref() == Some(g.slug.as_str()) { "badge rounded-pill text-bg-primary text-decoration-none" } else { "badge rounded-pill text-bg-secondary text-decoration-none" },
                                            "{g.name}"
                                        }
                                    }
                                }
                            }
                            if items.is_empty() {
                                p { class: "text-secondary", "No tracks found." }
                            } else {
                                ul { class: "list-group",
                                    for item in items.iter().cloned() {
                                        TrackRow { key: "{item.id}", content: item }
                                    }
                                }
                            }
                        }
                    }
                    Some(Err(message)) => rsx! {
                        div { class: "alert alert-warning", role: "alert",
                            "Could not load the catalog: {message}"
                        }
                    },
                    None => rsx! {
                        div { class: "d-flex justify-content-center py-5",
                            div { class: "spinner-border text-secondary", role: "status" }
                        }
                    },
                }
            }
        }
    }
}
