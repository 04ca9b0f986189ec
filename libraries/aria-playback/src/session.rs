//! Store and device wired together
//!
//! [`PlaybackSession`] owns a [`PlaybackStore`] and a [`DeviceBridge`] and
//! re-syncs the device after every command and every device event, so
//! callers never have to remember to.

use std::sync::Arc;

use crate::album::AlbumSummary;
use crate::command::Command;
use crate::device::{DeviceBridge, DeviceEvent, LoadToken, PlaybackDevice};
use crate::state::PlaybackState;
use crate::store::{PlaybackStore, SubscriptionId};

/// A playback store driving one device
#[derive(Debug)]
pub struct PlaybackSession<D> {
    store: PlaybackStore,
    bridge: DeviceBridge<D>,
}

impl<D: PlaybackDevice> PlaybackSession<D> {
    /// Wire `store` to `device` and bring the device in line with the
    /// store's current state
    pub fn new(store: PlaybackStore, device: D) -> Self {
        let mut bridge = DeviceBridge::new(device);
        bridge.sync(store.state());
        Self { store, bridge }
    }

    /// Dispatch `command` and sync the device; returns whether state changed
    pub fn command(&mut self, command: Command) -> bool {
        let changed = self.store.dispatch(command);
        if changed {
            self.bridge.sync(self.store.state());
        }
        changed
    }

    /// Deliver an event the device produced for load `token`
    pub fn deliver(&mut self, token: LoadToken, event: DeviceEvent) {
        self.bridge.handle_event(&mut self.store, token, event);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<PlaybackState>) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn state(&self) -> &PlaybackState {
        self.store.state()
    }

    pub fn album_summary(&self) -> AlbumSummary {
        self.store.album_summary()
    }

    pub fn store(&self) -> &PlaybackStore {
        &self.store
    }

    pub fn bridge(&self) -> &DeviceBridge<D> {
        &self.bridge
    }

    pub fn device(&self) -> &D {
        self.bridge.device()
    }

    pub fn device_mut(&mut self) -> &mut D {
        self.bridge.device_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::{Call, RecordingDevice};
    use crate::types::Track;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn playlist() -> Vec<Track> {
        vec![
            Track::new("1", "One", "one.mp3"),
            Track::new("2", "Two", "two.mp3"),
            Track::new("3", "Three", "three.mp3"),
        ]
    }

    #[test]
    fn commands_drive_the_device() {
        let mut session = PlaybackSession::new(PlaybackStore::default(), RecordingDevice::default());

        assert!(session.command(Command::PlayFrom {
            tracks: playlist(),
            index: 2,
        }));
        assert!(session.command(Command::TogglePlay));
        assert!(!session.command(Command::Pause));

        assert_eq!(
            session.device_mut().take_calls(),
            vec![
                Call::Volume(0.8),
                Call::Load("three.mp3".to_string()),
                Call::Play,
                Call::Pause,
            ]
        );
    }

    #[test]
    fn device_events_reach_subscribers() {
        let mut session = PlaybackSession::new(PlaybackStore::default(), RecordingDevice::default());
        let titles = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&titles);
        session.subscribe(move |state| {
            if let Some(track) = state.current_track() {
                sink.borrow_mut().push(track.title.clone());
            }
        });

        session.command(Command::PlayFrom {
            tracks: playlist(),
            index: 0,
        });
        let token = session.bridge().current_token().unwrap();
        session.deliver(token, DeviceEvent::Ended);

        assert_eq!(*titles.borrow(), vec!["One", "Two"]);
        assert_eq!(session.album_summary().song_count, "3 canciones");
    }

    #[test]
    fn new_session_loads_an_already_selected_track() {
        let mut store = PlaybackStore::default();
        store.play_from(playlist(), 1);

        let session = PlaybackSession::new(store, RecordingDevice::default());
        assert_eq!(session.bridge().loaded_source(), Some("two.mp3"));
        assert!(session.device().calls.contains(&Call::Play));
    }
}
