//! Core types for playback state

use serde::{Deserialize, Serialize};

/// One playable audio item with its display metadata
///
/// Tracks are immutable by convention; only `favorite` changes, and only
/// through [`Command::ToggleFavorite`](crate::Command::ToggleFavorite).
/// Metadata that derivations must tolerate being absent is optional here;
/// the catalog loader requires it on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: Option<String>,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Release year, kept as display text
    #[serde(default)]
    pub year: Option<String>,

    /// Duration as `mm:ss`
    #[serde(default)]
    pub duration: Option<String>,

    /// Play counter, display-only
    #[serde(default)]
    pub plays: String,

    /// Opaque source locator handed to the playback device
    pub file_path: String,

    /// Cover image locator
    #[serde(default)]
    pub cover: Option<String>,

    /// Artist image locator
    #[serde(default)]
    pub artist_image: Option<String>,

    /// Whether the user marked this track as a favorite
    #[serde(default)]
    pub favorite: bool,
}

impl Track {
    /// Create a track with only the required identity fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            album: None,
            year: None,
            duration: None,
            plays: String::new(),
            file_path: file_path.into(),
            cover: None,
            artist_image: None,
            favorite: false,
        }
    }

    /// Builder-style setter for the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Builder-style setter for the album
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Builder-style setter for the year
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Builder-style setter for the `mm:ss` duration
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Builder-style setter for cover and artist image
    pub fn with_images(mut self, cover: impl Into<String>, artist_image: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self.artist_image = Some(artist_image.into());
        self
    }

    /// Playlist membership is decided by id, not by full equality
    pub fn same_track(&self, other: &Track) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_and_defaults_favorite() {
        let json = r#"{
            "id": "1",
            "title": "Blah Blah Blah",
            "artist": "Armin van Buuren",
            "album": "Balance",
            "year": "2019",
            "duration": "3:45",
            "plays": "12345",
            "filePath": "blah-blah-blah.mp3",
            "cover": "balance.jpg",
            "artistImage": "armin.jpg"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.file_path, "blah-blah-blah.mp3");
        assert_eq!(track.artist_image.as_deref(), Some("armin.jpg"));
        assert!(!track.favorite);
    }

    #[test]
    fn same_track_compares_ids_only() {
        let a = Track::new("7", "Nemo", "nemo.mp3");
        let mut b = a.clone();
        b.favorite = true;
        b.title = "Nemo (Live)".to_string();

        assert!(a.same_track(&b));
        assert_ne!(a, b);
        assert!(!a.same_track(&Track::new("8", "Nemo", "nemo.mp3")));
    }
}
