//! Static track catalog
//!
//! The catalog is a JSON array of track objects. Unlike [`Track`], which
//! tolerates missing metadata, catalog entries must carry every field except
//! `favorite`.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{PlaybackError, Result};
use crate::time_format;
use crate::types::Track;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    id: String,
    title: String,
    artist: String,
    album: String,
    year: String,
    duration: String,
    plays: String,
    file_path: String,
    cover: String,
    artist_image: String,
    #[serde(default)]
    favorite: bool,
}

impl From<CatalogEntry> for Track {
    fn from(entry: CatalogEntry) -> Self {
        let mut track = Track::new(entry.id, entry.title, entry.file_path)
            .with_artist(entry.artist)
            .with_album(entry.album)
            .with_year(entry.year)
            .with_duration(entry.duration)
            .with_images(entry.cover, entry.artist_image);
        track.plays = entry.plays;
        track.favorite = entry.favorite;
        track
    }
}

/// Ordered, id-unique list of tracks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Parse a catalog from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Parse a catalog from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    /// Load a catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), tracks = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut tracks = Vec::with_capacity(entries.len());

        for entry in entries {
            if !seen.insert(entry.id.clone()) {
                return Err(PlaybackError::DuplicateTrackId(entry.id));
            }
            if time_format::parse(&entry.duration).is_none() {
                warn!(
                    id = %entry.id,
                    duration = %entry.duration,
                    "track duration is not mm:ss, it will not count toward totals"
                );
            }
            tracks.push(Track::from(entry));
        }

        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by id
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ONCE: &str = r#"[
        {
            "id": "1",
            "title": "Dark Chest of Wonders",
            "artist": "Nightwish",
            "album": "Once",
            "year": "2004",
            "duration": "4:28",
            "plays": "1,024",
            "filePath": "/music/dark-chest.mp3",
            "cover": "once.jpg",
            "artistImage": "nightwish.jpg",
            "favorite": true
        },
        {
            "id": "2",
            "title": "Nemo",
            "artist": "Nightwish",
            "album": "Once",
            "year": "2004",
            "duration": "4:36",
            "plays": "2,048",
            "filePath": "/music/nemo.mp3",
            "cover": "once.jpg",
            "artistImage": "nightwish.jpg"
        }
    ]"#;

    #[test]
    fn parses_entries_in_order() {
        let catalog = Catalog::from_json_str(ONCE).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = &catalog.tracks()[0];
        assert_eq!(first.title, "Dark Chest of Wonders");
        assert_eq!(first.file_path, "/music/dark-chest.mp3");
        assert_eq!(first.artist_image.as_deref(), Some("nightwish.jpg"));
        assert_eq!(first.plays, "1,024");
        assert!(first.favorite);

        let nemo = catalog.get("2").unwrap();
        assert!(!nemo.favorite);
        assert_eq!(nemo.duration.as_deref(), Some("4:36"));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"[{"id": "1", "title": "No path", "artist": "A", "album": "B",
            "year": "2000", "duration": "1:00", "plays": "0",
            "cover": "c.jpg", "artistImage": "a.jpg"}]"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, PlaybackError::CatalogParse(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = ONCE.replace("\"id\": \"2\"", "\"id\": \"1\"");
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, PlaybackError::DuplicateTrackId(id) if id == "1"));
    }

    #[test]
    fn malformed_duration_is_accepted() {
        let json = ONCE.replace("4:36", "unknown");
        let catalog = Catalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.get("2").unwrap().duration.as_deref(), Some("unknown"));
        assert_eq!(time_format::total_seconds(catalog.tracks()), 268);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::from_json_str("[]").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.into_tracks().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ONCE.as_bytes()).unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PlaybackError::Io(_)));
    }
}
