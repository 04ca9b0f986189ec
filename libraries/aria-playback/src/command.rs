//! Commands and the pure state reducer

use crate::state::{PlaybackState, Selection};
use crate::types::Track;

/// Every state transition the store accepts
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the playlist; the selection is left untouched
    SetPlaylist(Vec<Track>),

    /// Select a track; `index` should be its position in the playlist
    SetCurrentTrack { track: Track, index: usize },

    /// Replace the playlist and select the entry at `index`
    PlayFrom { tracks: Vec<Track>, index: usize },

    Play,
    Pause,
    TogglePlay,

    /// Pause and rewind to the start of the current track
    Stop,

    /// Advance with wraparound
    NextTrack,

    /// Go back with wraparound
    PreviousTrack,

    /// Flip `favorite` on the current track and its playlist entry
    ToggleFavorite,

    SetVolume(f64),
    SetProgress(f64),
    SetCurrentTime(f64),
    SetDuration(f64),
}

impl Command {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetPlaylist(_) => "set_playlist",
            Command::SetCurrentTrack { .. } => "set_current_track",
            Command::PlayFrom { .. } => "play_from",
            Command::Play => "play",
            Command::Pause => "pause",
            Command::TogglePlay => "toggle_play",
            Command::Stop => "stop",
            Command::NextTrack => "next_track",
            Command::PreviousTrack => "previous_track",
            Command::ToggleFavorite => "toggle_favorite",
            Command::SetVolume(_) => "set_volume",
            Command::SetProgress(_) => "set_progress",
            Command::SetCurrentTime(_) => "set_current_time",
            Command::SetDuration(_) => "set_duration",
        }
    }
}

/// Apply `command` to `state`, producing the next snapshot
///
/// Never fails: commands that make no sense in the current state
/// (navigation on an empty playlist, favorite without a track) return an
/// unchanged copy.
pub fn reduce(state: &PlaybackState, command: Command) -> PlaybackState {
    let mut next = state.clone();

    match command {
        Command::SetPlaylist(tracks) => {
            next.playlist = tracks;
        }
        Command::SetCurrentTrack { track, index } => {
            next.select(track, index);
        }
        Command::PlayFrom { tracks, index } => {
            let track = tracks.get(index).cloned();
            next.playlist = tracks;
            if let Some(track) = track {
                next.select(track, index);
            }
        }
        Command::Play => next.is_playing = true,
        Command::Pause => next.is_playing = false,
        Command::TogglePlay => next.is_playing = !state.is_playing,
        Command::Stop => {
            let at_start = state.progress == 0.0 && state.current_time == 0.0;
            if state.is_playing || !at_start {
                next.is_playing = false;
                next.rewind();
            }
        }
        Command::NextTrack => {
            let len = state.playlist.len();
            if len > 0 {
                let index = next_index(state.current_index(), len);
                next.select(state.playlist[index].clone(), index);
            }
        }
        Command::PreviousTrack => {
            let len = state.playlist.len();
            if len > 0 {
                let index = previous_index(state.current_index(), len);
                next.select(state.playlist[index].clone(), index);
            }
        }
        Command::ToggleFavorite => {
            if let Some(Selection { track, .. }) = next.selection.as_mut() {
                track.favorite = !track.favorite;
                let id = track.id.clone();
                for entry in next.playlist.iter_mut().filter(|t| t.id == id) {
                    entry.favorite = !entry.favorite;
                }
            }
        }
        Command::SetVolume(volume) => next.volume = volume,
        Command::SetProgress(progress) => next.progress = progress,
        Command::SetCurrentTime(time) => next.current_time = time,
        Command::SetDuration(duration) => next.duration = duration,
    }

    next
}

/// Index after `current` in a playlist of `len` (> 0) entries
///
/// With nothing selected this lands on the first track.
pub fn next_index(current: Option<usize>, len: usize) -> usize {
    match current {
        None => 0,
        Some(i) => (i % len + 1) % len,
    }
}

/// Index before `current` in a playlist of `len` (> 0) entries
///
/// With nothing selected this wraps to the last track rather than producing
/// an index before the start. A stale index past the end (the playlist
/// shrank after selection) steps back from the end.
pub fn previous_index(current: Option<usize>, len: usize) -> usize {
    match current {
        None | Some(0) => len - 1,
        Some(i) => i.min(len) - 1,
    }
}
