//! Album summary derivation
//!
//! A pure function of the current track and playlist that produces the
//! header metadata shown above the track list. When nothing is loaded a
//! fixed default album is shown instead.

use serde::{Deserialize, Serialize};

use crate::state::PlaybackState;
use crate::time_format;
use crate::types::Track;

/// Display metadata for the album header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumSummary {
    pub name: String,
    pub artist: String,
    pub year: String,
    /// Pluralised track count, e.g. `"3 canciones"`
    pub song_count: String,
    /// Aggregated playlist duration, e.g. `"1 hora 20 min"`
    pub duration: String,
    pub cover: String,
    pub artist_image: Option<String>,
    pub is_favorite: bool,
}

/// Words used when rendering summaries
///
/// Defaults match the player's original Spanish wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLabels {
    pub unknown_album: String,
    pub unknown_artist: String,
    pub unknown_year: String,
    pub track_singular: String,
    pub track_plural: String,
    pub hour_singular: String,
    pub hour_plural: String,
    pub minutes: String,
}

impl Default for SummaryLabels {
    fn default() -> Self {
        Self {
            unknown_album: "Álbum Desconocido".to_string(),
            unknown_artist: "Artista Desconocido".to_string(),
            unknown_year: "Año Desconocido".to_string(),
            track_singular: "canción".to_string(),
            track_plural: "canciones".to_string(),
            hour_singular: "hora".to_string(),
            hour_plural: "horas".to_string(),
            minutes: "min".to_string(),
        }
    }
}

impl SummaryLabels {
    /// `"0 canciones"`, `"1 canción"`, `"N canciones"`
    pub fn track_count(&self, count: usize) -> String {
        let word = if count == 1 {
            &self.track_singular
        } else {
            &self.track_plural
        };
        format!("{} {}", count, word)
    }
}

/// The album shown before any track has been selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultAlbum {
    pub name: String,
    pub artist: String,
    pub year: String,
    pub song_count: String,
    pub duration: String,
    pub cover: String,
    pub artist_image: String,
}

impl Default for DefaultAlbum {
    fn default() -> Self {
        Self {
            name: "Once".to_string(),
            artist: "Nightwish".to_string(),
            year: "2004".to_string(),
            song_count: "11 canciones".to_string(),
            duration: "1 hora".to_string(),
            cover: "once.jpg".to_string(),
            artist_image: "nightwish.jpg".to_string(),
        }
    }
}

impl DefaultAlbum {
    fn to_summary(&self) -> AlbumSummary {
        AlbumSummary {
            name: self.name.clone(),
            artist: self.artist.clone(),
            year: self.year.clone(),
            song_count: self.song_count.clone(),
            duration: self.duration.clone(),
            cover: self.cover.clone(),
            artist_image: Some(self.artist_image.clone()),
            is_favorite: false,
        }
    }
}

/// Derives [`AlbumSummary`] values with a fixed set of labels and fallbacks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumSummarizer {
    labels: SummaryLabels,
    default_album: DefaultAlbum,
}

impl AlbumSummarizer {
    pub fn new(labels: SummaryLabels, default_album: DefaultAlbum) -> Self {
        Self {
            labels,
            default_album,
        }
    }

    pub fn labels(&self) -> &SummaryLabels {
        &self.labels
    }

    pub fn default_album(&self) -> &DefaultAlbum {
        &self.default_album
    }

    /// Summarise the album of `current` in the context of `playlist`
    ///
    /// Track count and duration are taken from the playlist, not from the
    /// album, so a track selected without a valid playlist yields
    /// `"0 canciones"` and `"0 min"`.
    pub fn summarize(&self, current: Option<&Track>, playlist: &[Track]) -> AlbumSummary {
        let Some(track) = current else {
            return self.default_album.to_summary();
        };

        let labels = &self.labels;
        AlbumSummary {
            name: non_empty(track.album.as_deref())
                .unwrap_or(labels.unknown_album.as_str())
                .to_string(),
            artist: non_empty(track.artist.as_deref())
                .unwrap_or(labels.unknown_artist.as_str())
                .to_string(),
            year: non_empty(track.year.as_deref())
                .unwrap_or(labels.unknown_year.as_str())
                .to_string(),
            song_count: labels.track_count(playlist.len()),
            duration: time_format::aggregate_with(playlist, labels),
            cover: non_empty(track.cover.as_deref())
                .unwrap_or(self.default_album.cover.as_str())
                .to_string(),
            artist_image: non_empty(track.artist_image.as_deref()).map(str::to_string),
            is_favorite: track.favorite,
        }
    }

    /// Summarise a state snapshot
    pub fn summarize_state(&self, state: &PlaybackState) -> AlbumSummary {
        self.summarize(state.current_track(), &state.playlist)
    }
}

/// Summarise with the default labels and default album
pub fn summarize(current: Option<&Track>, playlist: &[Track]) -> AlbumSummary {
    AlbumSummarizer::default().summarize(current, playlist)
}

// Empty strings count as missing, like absent fields.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
