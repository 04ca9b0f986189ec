//! Immutable playback state snapshot

use serde::Serialize;

use crate::types::Track;

/// Default volume for a fresh session (0-1)
pub const DEFAULT_VOLUME: f64 = 0.8;

/// The selected track and its position in the playlist
///
/// Keeping both in one value makes "index set iff track set" structural.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub index: usize,
    pub track: Track,
}

/// Complete playback state
///
/// Every command produces a new snapshot; nothing mutates a snapshot once
/// it has been published to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Current track and index, `None` when nothing is selected
    ///
    /// After a navigation command `selection.track == playlist[selection.index]`.
    /// Replacing the playlist does not re-sync the selection.
    pub selection: Option<Selection>,

    pub is_playing: bool,

    /// Fractional position (0-1), display-only
    pub progress: f64,

    /// Seconds elapsed, pushed by the playback clock
    pub current_time: f64,

    /// Track length in seconds, pushed by the playback clock once known
    pub duration: f64,

    /// Output volume (0-1), not clamped by the store
    pub volume: f64,

    pub playlist: Vec<Track>,

    /// Bumped whenever the current track restarts from zero (selection or stop)
    ///
    /// Lets a device that already has the source loaded tell a restart apart
    /// from a snapshot that merely has `current_time == 0`.
    pub restarts: u64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::with_volume(DEFAULT_VOLUME)
    }
}

impl PlaybackState {
    /// Fresh session state with the given starting volume
    pub fn with_volume(volume: f64) -> Self {
        Self {
            selection: None,
            is_playing: false,
            progress: 0.0,
            current_time: 0.0,
            duration: 0.0,
            volume,
            playlist: Vec::new(),
            restarts: 0,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.selection.as_ref().map(|s| &s.track)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.selection.as_ref().map(|s| s.index)
    }

    /// Current index with `-1` standing in for "nothing selected"
    pub fn current_index_or_sentinel(&self) -> i64 {
        self.current_index()
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Whether `track_id` is the selected track
    pub fn is_active(&self, track_id: &str) -> bool {
        self.current_track().is_some_and(|t| t.id == track_id)
    }

    /// Whether the selection still matches the playlist entry at its index
    pub fn selection_in_sync(&self) -> bool {
        match &self.selection {
            Some(sel) => self
                .playlist
                .get(sel.index)
                .is_some_and(|t| t.same_track(&sel.track)),
            None => true,
        }
    }

    /// Select `track` at `index` and restart playback from the beginning
    pub(crate) fn select(&mut self, track: Track, index: usize) {
        self.selection = Some(Selection { index, track });
        self.is_playing = true;
        self.rewind();
    }

    /// Move to the start of the current track
    pub(crate) fn rewind(&mut self) {
        self.progress = 0.0;
        self.current_time = 0.0;
        self.restarts = self.restarts.wrapping_add(1);
    }
}
