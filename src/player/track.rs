use serde::{Deserialize, Serialize};

/// Data attributes read from a play control.
pub const ATTR_SRC: &str = "data-src";
pub const ATTR_TITLE: &str = "data-title";
pub const ATTR_ARTIST: &str = "data-artist";
pub const ATTR_THUMB: &str = "data-thumb";

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A playable track as described by a play control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrackRef {
    pub src: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TrackRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Build a track from a control's data attributes.
    /// Returns `None` when the control carries no source.
    pub fn from_attributes<F>(mut attribute: F) -> Option<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let src = non_empty(attribute(ATTR_SRC))?;
        Some(Self {
            src,
            title: non_empty(attribute(ATTR_TITLE)),
            artist: non_empty(attribute(ATTR_ARTIST)),
            thumbnail: non_empty(attribute(ATTR_THUMB)),
        })
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_all_data_attributes() {
        let map = attrs(&[
            ("data-src", "/media/a.mp3"),
            ("data-title", "Song"),
            ("data-artist", "Band"),
            ("data-thumb", "/media/a.jpg"),
        ]);
        let track = TrackRef::from_attributes(|name| map.get(name).cloned()).unwrap();
        assert_eq!(
            track,
            TrackRef::new("/media/a.mp3")
                .with_title("Song")
                .with_artist("Band")
                .with_thumbnail("/media/a.jpg")
        );
    }

    #[test]
    fn control_without_source_yields_nothing() {
        let map = attrs(&[("data-title", "Song")]);
        assert!(TrackRef::from_attributes(|name| map.get(name).cloned()).is_none());

        let map = attrs(&[("data-src", "")]);
        assert!(TrackRef::from_attributes(|name| map.get(name).cloned()).is_none());
    }

    #[test]
    fn missing_metadata_falls_back_to_unknown_labels() {
        let map = attrs(&[("data-src", "/a.mp3"), ("data-title", "")]);
        let track = TrackRef::from_attributes(|name| map.get(name).cloned()).unwrap();
        assert_eq!(track.title, None);
        assert_eq!(track.display_title(), "Unknown Title");
        assert_eq!(track.display_artist(), "Unknown Artist");
    }
}
