//! Playback device boundary
//!
//! The store never touches audio. A [`PlaybackDevice`] is whatever actually
//! plays sources (a browser audio element, a native output, a simulated
//! clock in tests) and [`DeviceBridge`] keeps it in step with the state:
//! it watches `(file_path, is_playing, volume)` on every snapshot and routes
//! the device's clock events back into the store.

use tracing::{debug, error, trace, warn};

use crate::error::DeviceError;
use crate::state::PlaybackState;
use crate::store::PlaybackStore;

/// Generation counter identifying one device load
///
/// Every time the bridge loads a new source it hands the device a fresh
/// token. Events tagged with an older token belong to a superseded load and
/// are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(u64);

impl LoadToken {
    /// Raw generation number
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Events emitted by a playback device
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Source metadata is available; `duration` in seconds
    MetadataLoaded { duration: f64 },

    /// Playback position advanced; `current_time` in seconds
    TimeUpdate { current_time: f64 },

    /// The source played to its end
    Ended,

    /// The device hit a non-fatal problem
    Error { message: String },
}

/// Platform playback primitives
///
/// Implementors only need to do what they are told; deciding when to load,
/// start or rewind is the bridge's job.
pub trait PlaybackDevice {
    /// Load a source for playback
    ///
    /// # Arguments
    /// * `source` - Opaque source locator (the track's `file_path`)
    /// * `token` - Token to attach to every event produced by this load
    fn load(&mut self, source: &str, token: LoadToken) -> Result<(), DeviceError>;

    /// Start or resume playback
    ///
    /// May be refused, e.g. when the platform requires a user gesture.
    fn play(&mut self) -> Result<(), DeviceError>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Move the playback position, in seconds
    fn seek(&mut self, seconds: f64);

    /// Set output volume (0-1)
    fn set_volume(&mut self, volume: f64);
}

/// Keeps a [`PlaybackDevice`] in step with [`PlaybackState`] snapshots
#[derive(Debug)]
pub struct DeviceBridge<D> {
    device: D,
    /// Source currently loaded on the device
    loaded: Option<String>,
    token: Option<LoadToken>,
    next_generation: u64,
    last_volume: Option<f64>,
    last_playing: bool,
    last_restarts: u64,
}

impl<D: PlaybackDevice> DeviceBridge<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            loaded: None,
            token: None,
            next_generation: 0,
            last_volume: None,
            last_playing: false,
            last_restarts: 0,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Token of the current load, if any source is loaded
    pub fn current_token(&self) -> Option<LoadToken> {
        self.token
    }

    /// Source locator currently loaded on the device
    pub fn loaded_source(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn into_device(self) -> D {
        self.device
    }

    /// Drive the device toward `state`
    ///
    /// Loads when the current track's source changes, rewinds when the same
    /// source was restarted (stop, or re-selecting the same track), and
    /// plays or pauses when that or `is_playing` changed. A source that
    /// failed to load is retried on the next sync.
    pub fn sync(&mut self, state: &PlaybackState) {
        if self.last_volume != Some(state.volume) {
            self.device.set_volume(state.volume.clamp(0.0, 1.0));
            self.last_volume = Some(state.volume);
        }

        let source = state.current_track().map(|t| t.file_path.as_str());
        let rewound = state.restarts != self.last_restarts;
        self.last_restarts = state.restarts;
        let mut restarted = false;

        match source {
            Some(source) if self.loaded.as_deref() != Some(source) => {
                let token = self.next_token();
                debug!(source, generation = token.0, "loading source");
                if let Err(e) = self.device.load(source, token) {
                    error!(error = %e, "device failed to load source");
                    self.loaded = None;
                    self.token = None;
                    self.last_playing = false;
                    return;
                }
                self.loaded = Some(source.to_string());
                self.token = Some(token);
                restarted = true;
            }
            Some(_) => {
                if rewound {
                    trace!("rewinding device");
                    self.device.seek(0.0);
                    restarted = true;
                }
            }
            None => {
                if self.loaded.take().is_some() {
                    self.token = None;
                    self.device.pause();
                }
                self.last_playing = false;
                return;
            }
        }

        if restarted || state.is_playing != self.last_playing {
            if state.is_playing {
                if let Err(e) = self.device.play() {
                    warn!(error = %e, "device refused to start playback");
                }
            } else {
                self.device.pause();
            }
            self.last_playing = state.is_playing;
        }
    }

    /// Apply a device event to `store`, then re-sync the device
    ///
    /// Each event is at most one store transition. Events whose `token` is
    /// not the current load are ignored.
    pub fn handle_event(&mut self, store: &mut PlaybackStore, token: LoadToken, event: DeviceEvent) {
        if self.token != Some(token) {
            debug!(
                generation = token.0,
                current = self.token.map(|t| t.0),
                "dropping stale device event"
            );
            return;
        }

        match event {
            DeviceEvent::MetadataLoaded { duration } => store.set_duration(duration),
            DeviceEvent::TimeUpdate { current_time } => store.set_current_time(current_time),
            DeviceEvent::Ended => {
                debug!("source ended, advancing");
                store.next_track();
            }
            DeviceEvent::Error { message } => {
                error!(%message, "playback device error");
            }
        }

        self.sync(store.state());
    }

    fn next_token(&mut self) -> LoadToken {
        let token = LoadToken(self.next_generation);
        self.next_generation += 1;
        token
    }
}
