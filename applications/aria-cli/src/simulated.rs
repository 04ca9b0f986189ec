//! Simulated playback clock
//!
//! Plays nothing. Advances a position when told to tick and queues the
//! events a real player would emit.

use std::collections::{HashMap, VecDeque};

use aria_playback::{time_format, DeviceError, DeviceEvent, LoadToken, PlaybackDevice, Track};
use tracing::trace;

/// Length assumed for tracks without a parseable duration, in seconds
pub const FALLBACK_DURATION: f64 = 180.0;

#[derive(Debug)]
struct Loaded {
    token: LoadToken,
    duration: f64,
}

#[derive(Debug, Default)]
pub struct SimulatedDevice {
    durations: HashMap<String, f64>,
    loaded: Option<Loaded>,
    position: f64,
    playing: bool,
    volume: f64,
    events: VecDeque<(LoadToken, DeviceEvent)>,
}

impl SimulatedDevice {
    /// Device that knows the lengths of `tracks` by source locator
    pub fn new(tracks: &[Track]) -> Self {
        let durations = tracks
            .iter()
            .filter_map(|t| {
                let secs = t.duration.as_deref().and_then(time_format::parse)?;
                Some((t.file_path.clone(), secs as f64))
            })
            .collect();

        Self {
            durations,
            ..Self::default()
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Advance the clock by `step` seconds while playing
    pub fn tick(&mut self, step: f64) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        if !self.playing {
            return;
        }

        let token = loaded.token;
        let duration = loaded.duration;
        self.position = (self.position + step).min(duration);
        self.events.push_back((
            token,
            DeviceEvent::TimeUpdate {
                current_time: self.position,
            },
        ));

        if self.position >= duration {
            self.playing = false;
            self.events.push_back((token, DeviceEvent::Ended));
        }
    }

    /// Next queued event, oldest first
    pub fn next_event(&mut self) -> Option<(LoadToken, DeviceEvent)> {
        self.events.pop_front()
    }
}

impl PlaybackDevice for SimulatedDevice {
    fn load(&mut self, source: &str, token: LoadToken) -> Result<(), DeviceError> {
        let duration = self
            .durations
            .get(source)
            .copied()
            .unwrap_or(FALLBACK_DURATION);
        trace!(source, duration, "simulated load");

        self.loaded = Some(Loaded { token, duration });
        self.position = 0.0;
        self.playing = false;
        self.events
            .push_back((token, DeviceEvent::MetadataLoaded { duration }));
        Ok(())
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        if self.loaded.is_none() {
            return Err(DeviceError::PlayRejected("nothing loaded".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        let max = self.loaded.as_ref().map_or(0.0, |l| l.duration);
        self.position = seconds.clamp(0.0, max);
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_playback::{Command, PlaybackSession, PlaybackStore};

    fn tracks() -> Vec<Track> {
        vec![
            Track::new("1", "Short", "short.mp3").with_duration("0:03"),
            Track::new("2", "Unknown", "unknown.mp3"),
        ]
    }

    fn drain(device: &mut SimulatedDevice) -> Vec<DeviceEvent> {
        std::iter::from_fn(|| device.next_event())
            .map(|(_, e)| e)
            .collect()
    }

    fn session_at(index: usize) -> PlaybackSession<SimulatedDevice> {
        let mut session =
            PlaybackSession::new(PlaybackStore::default(), SimulatedDevice::new(&tracks()));
        session.command(Command::PlayFrom {
            tracks: tracks(),
            index,
        });
        session
    }

    #[test]
    fn plays_to_the_end() {
        let mut session = session_at(0);
        let device = session.device_mut();
        device.tick(2.0);
        device.tick(2.0);
        device.tick(2.0);

        assert_eq!(
            drain(device),
            vec![
                DeviceEvent::MetadataLoaded { duration: 3.0 },
                DeviceEvent::TimeUpdate { current_time: 2.0 },
                DeviceEvent::TimeUpdate { current_time: 3.0 },
                DeviceEvent::Ended,
            ]
        );
        assert!(!device.is_playing());
        assert_eq!(device.position(), 3.0);
    }

    #[test]
    fn unknown_duration_uses_fallback() {
        let mut session = session_at(1);

        let events = drain(session.device_mut());
        assert_eq!(
            events,
            vec![DeviceEvent::MetadataLoaded {
                duration: FALLBACK_DURATION
            }]
        );
        assert!(session.device().is_playing());
        assert_eq!(session.device().volume(), 0.8);
    }

    #[test]
    fn play_without_source_is_rejected() {
        let mut device = SimulatedDevice::default();
        assert!(device.play().is_err());
        device.tick(1.0);
        assert!(device.next_event().is_none());
    }
}
