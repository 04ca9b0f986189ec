//! Playback store - the single source of truth
//!
//! Holds the current [`PlaybackState`] snapshot, funnels every operation
//! through [`reduce`] and notifies subscribers synchronously after each
//! transition that changed the state.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::album::{AlbumSummarizer, AlbumSummary};
use crate::command::{reduce, Command};
use crate::config::Settings;
use crate::state::PlaybackState;
use crate::types::Track;

/// Callback invoked with the new snapshot after a committed transition
pub type Listener = Box<dyn FnMut(&Arc<PlaybackState>)>;

/// Handle returned by [`PlaybackStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Explicit, injectable playback store
///
/// Construct one per session and hand it to whatever drives the UI and the
/// playback device. All operations take `&mut self`, so transitions are
/// serialized and each listener sees a consistent post-transition snapshot.
pub struct PlaybackStore {
    state: Arc<PlaybackState>,
    summarizer: AlbumSummarizer,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(PlaybackState::default())
    }
}

impl std::fmt::Debug for PlaybackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PlaybackStore {
    /// Create a store starting from `initial`
    pub fn new(initial: PlaybackState) -> Self {
        Self::with_summarizer(initial, AlbumSummarizer::default())
    }

    /// Create a store that derives album summaries with `summarizer`
    pub fn with_summarizer(initial: PlaybackState, summarizer: AlbumSummarizer) -> Self {
        Self {
            state: Arc::new(initial),
            summarizer,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store from loaded settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_summarizer(settings.initial_state(), settings.summarizer())
    }

    // ===== Reading =====

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<PlaybackState> {
        Arc::clone(&self.state)
    }

    /// Album header for the current state
    pub fn album_summary(&self) -> AlbumSummary {
        self.summarizer.summarize_state(&self.state)
    }

    /// Whether `track_id` is the current track
    pub fn is_active(&self, track_id: &str) -> bool {
        self.state.is_active(track_id)
    }

    // ===== Observers =====

    /// Register a listener; it is called after every state-changing command
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<PlaybackState>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // ===== Transitions =====

    /// Apply `command` and notify subscribers if the state changed
    ///
    /// Returns whether a new snapshot was committed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let name = command.name();
        let next = reduce(&self.state, command);

        if next == *self.state {
            trace!(command = name, "command left state unchanged");
            return false;
        }

        debug!(
            command = name,
            index = next.current_index_or_sentinel(),
            playing = next.is_playing,
            "state transition"
        );

        self.state = Arc::new(next);
        let snapshot = Arc::clone(&self.state);
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
        true
    }

    /// Replace the playlist without touching the current selection
    pub fn set_playlist(&mut self, tracks: Vec<Track>) {
        self.dispatch(Command::SetPlaylist(tracks));
    }

    /// Select `track` at `index` and start it from the beginning
    pub fn set_current_track(&mut self, track: Track, index: usize) {
        self.dispatch(Command::SetCurrentTrack { track, index });
    }

    /// Replace the playlist and start the entry at `index`
    pub fn play_from(&mut self, tracks: Vec<Track>, index: usize) {
        self.dispatch(Command::PlayFrom { tracks, index });
    }

    pub fn play(&mut self) {
        self.dispatch(Command::Play);
    }

    pub fn pause(&mut self) {
        self.dispatch(Command::Pause);
    }

    pub fn toggle_play(&mut self) {
        self.dispatch(Command::TogglePlay);
    }

    /// Pause and rewind the current track
    pub fn stop(&mut self) {
        self.dispatch(Command::Stop);
    }

    /// Advance to the next track, wrapping to the first
    pub fn next_track(&mut self) {
        self.dispatch(Command::NextTrack);
    }

    /// Go back to the previous track, wrapping to the last
    pub fn previous_track(&mut self) {
        self.dispatch(Command::PreviousTrack);
    }

    pub fn toggle_favorite(&mut self) {
        self.dispatch(Command::ToggleFavorite);
    }

    /// Set the volume; callers clamp to 0-1
    pub fn set_volume(&mut self, volume: f64) {
        self.dispatch(Command::SetVolume(volume));
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.dispatch(Command::SetProgress(progress));
    }

    pub fn set_current_time(&mut self, time: f64) {
        self.dispatch(Command::SetCurrentTime(time));
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.dispatch(Command::SetDuration(duration));
    }
}
