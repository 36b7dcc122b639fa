use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::player::TrackRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Genre {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Audio,
    Video,
    #[serde(other)]
    Other,
}

impl ContentType {
    pub fn as_query_value(self) -> Option<&'static str> {
        match self {
            Self::Audio => Some("audio"),
            Self::Video => Some("video"),
            Self::Other => None,
        }
    }
}

/// One published item from the content catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Content {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub duration_display: Option<String>,
    #[serde(default)]
    pub genre: Vec<Genre>,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub uploaded_by_name: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Content {
    /// Playable track for this item, if it has a media file.
    pub fn track(&self) -> Option<TrackRef> {
        let src = self.file_path.as_deref().filter(|p| !p.trim().is_empty())?;
        let mut track = TrackRef::new(src).with_title(self.title.clone());
        if !self.artist_name.trim().is_empty() {
            track = track.with_artist(self.artist_name.clone());
        }
        if let Some(thumb) = self.thumbnail.as_deref().filter(|t| !t.trim().is_empty()) {
            track = track.with_thumbnail(thumb);
        }
        Some(track)
    }

    pub fn duration_label(&self) -> String {
        self.duration_display
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| crate::player::format_time(self.duration as f64))
    }
}

/// The list endpoint answers with a bare array, or a page envelope when
/// pagination is enabled server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentListResponse {
    List(Vec<Content>),
    Page(ContentPage),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Content>,
}

impl ContentListResponse {
    pub fn into_items(self) -> Vec<Content> {
        match self {
            Self::List(items) => items,
            Self::Page(page) => page.results,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentOrdering {
    #[default]
    Newest,
    MostViewed,
    Title,
}

impl ContentOrdering {
    fn as_query_value(self) -> &'static str {
        match self {
            Self::Newest => "-uploaded_at",
            Self::MostViewed => "-view_count",
            Self::Title => "title",
        }
    }
}

/// Filters for the content list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentQuery {
    pub content_type: ContentType,
    pub genre: Option<String>,
    pub search: Option<String>,
    pub ordering: ContentOrdering,
}

impl ContentQuery {
    pub fn audio() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, slug: impl Into<String>) -> Self {
        self.genre = Some(slug.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_ordering(mut self, ordering: ContentOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn query_string(&self) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(kind) = self.content_type.as_query_value() {
            params.push(("type", kind.to_string()));
        }
        if let Some(genre) = self.genre.as_deref().filter(|g| !g.trim().is_empty()) {
            params.push(("genre", genre.trim().to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.trim().to_string()));
        }
        if self.ordering != ContentOrdering::Newest {
            params.push(("ordering", self.ordering.as_query_value().to_string()));
        }

        params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{
        "id": 7,
        "title": "Night Drive",
        "description": "",
        "content_type": "audio",
        "file_path": "http://localhost:8000/media/content/night.mp3",
        "thumbnail": null,
        "duration": 245,
        "duration_display": "4:05",
        "genre": [{"id": 1, "name": "Synthwave", "slug": "synthwave"}],
        "artist_name": "Neon",
        "album": "",
        "is_premium": false,
        "view_count": 12,
        "like_count": 3,
        "comment_count": 0,
        "uploaded_by_name": "admin",
        "uploaded_at": "2024-05-01T10:00:00Z"
    }"#;

    #[test]
    fn decodes_bare_list_and_page_envelope() {
        let list: ContentListResponse = serde_json::from_str(&format!("[{ITEM}]")).unwrap();
        assert_eq!(list.into_items().len(), 1);

        let page: ContentListResponse = serde_json::from_str(&format!(
            r#"{{"count": 1, "next": null, "previous": null, "results": [{ITEM}]}}"#
        ))
        .unwrap();
        let items = page.into_items();
        assert_eq!(items[0].title, "Night Drive");
        assert_eq!(items[0].genre[0].slug, "synthwave");
        assert!(items[0].uploaded_at.is_some());
    }

    #[test]
    fn content_maps_to_track() {
        let item: Content = serde_json::from_str(ITEM).unwrap();
        let track = item.track().unwrap();
        assert_eq!(track.src, "http://localhost:8000/media/content/night.mp3");
        assert_eq!(track.display_title(), "Night Drive");
        assert_eq!(track.display_artist(), "Neon");
        assert_eq!(track.thumbnail, None);
        assert_eq!(item.duration_label(), "4:05");
    }

    #[test]
    fn content_without_file_is_not_playable() {
        let item = Content {
            title: "Draft".into(),
            duration: 61,
            ..Content::default()
        };
        assert!(item.track().is_none());
        assert_eq!(item.duration_label(), "1:01");
    }

    #[test]
    fn unknown_content_type_is_tolerated() {
        let item: Content =
            serde_json::from_str(r#"{"id": 1, "title": "Talk", "content_type": "podcast"}"#)
                .unwrap();
        assert_eq!(item.content_type, ContentType::Other);
    }

    #[test]
    fn query_string_encodes_filters() {
        assert_eq!(ContentQuery::audio().query_string(), "type=audio");
        let query = ContentQuery::audio()
            .with_genre("lo-fi")
            .with_search("night drive")
            .with_ordering(ContentOrdering::MostViewed);
        assert_eq!(
            query.query_string(),
            "type=audio&genre=lo-fi&search=night%20drive&ordering=-view_count"
        );
        assert_eq!(
            ContentQuery::audio().with_search("   ").query_string(),
            "type=audio"
        );
    }
}
