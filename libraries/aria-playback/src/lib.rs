//! Aria - Playback State Engine
//!
//! Platform-agnostic playback state for the Aria music player.
//!
//! This crate provides:
//! - An immutable playback state snapshot and a pure reducer
//! - An explicit store with subscribe/unsubscribe observers
//! - Playlist navigation with wraparound in both directions
//! - Album summaries derived from the current track and playlist
//! - Duration parsing and aggregation (`mm:ss` → `"1 hora 20 min"`)
//! - A device boundary that keeps an audio backend in step with the state
//! - Catalog loading and layered settings
//!
//! # Architecture
//!
//! `aria-playback` never plays audio itself:
//! - No audio output, no decoding, no UI
//! - Time flows in from a playback clock as [`DeviceEvent`]s
//! - Commands flow out to a [`PlaybackDevice`] through a [`DeviceBridge`]
//!
//! Data flows one way: commands → [`PlaybackStore`] → observers re-derive
//! the [`AlbumSummary`] and re-render.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use aria_playback::{PlaybackStore, Track};
//!
//! let mut store = PlaybackStore::default();
//!
//! let tracks = vec![
//!     Track::new("1", "Dark Chest of Wonders", "/music/dark-chest.mp3").with_duration("4:28"),
//!     Track::new("2", "Wish I Had an Angel", "/music/angel.mp3").with_duration("4:06"),
//!     Track::new("3", "Nemo", "/music/nemo.mp3").with_duration("4:36"),
//! ];
//!
//! // Click the second row
//! store.play_from(tracks, 1);
//! assert!(store.state().is_playing);
//!
//! store.next_track();
//! store.next_track();
//! assert_eq!(store.state().current_index(), Some(0));
//!
//! let summary = store.album_summary();
//! assert_eq!(summary.song_count, "3 canciones");
//! assert_eq!(summary.duration, "13 min");
//! ```
//!
//! # Example: Observers
//!
//! ```rust
//! use aria_playback::PlaybackStore;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut store = PlaybackStore::default();
//! let renders = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&renders);
//! let id = store.subscribe(move |_state| counter.set(counter.get() + 1));
//!
//! store.play();
//! store.play(); // no change, no notification
//! store.unsubscribe(id);
//! store.pause();
//!
//! assert_eq!(renders.get(), 1);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use aria_playback::{
//!     Command, DeviceError, LoadToken, PlaybackDevice, PlaybackSession, PlaybackStore, Track,
//! };
//!
//! // Implement PlaybackDevice for your platform
//! struct MyOutput {
//!     // ... platform-specific player
//! }
//!
//! impl PlaybackDevice for MyOutput {
//!     fn load(&mut self, source: &str, token: LoadToken) -> Result<(), DeviceError> {
//!         // Open the source, remember `token` for the events it produces
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<(), DeviceError> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) {}
//!
//!     fn seek(&mut self, seconds: f64) {}
//!
//!     fn set_volume(&mut self, volume: f64) {}
//! }
//!
//! let mut session = PlaybackSession::new(PlaybackStore::default(), MyOutput {});
//! session.command(Command::PlayFrom {
//!     tracks: vec![Track::new("1", "Nemo", "/music/nemo.mp3")],
//!     index: 0,
//! });
//!
//! // Forward the platform's clock events as they arrive:
//! // session.deliver(token, DeviceEvent::TimeUpdate { current_time: 1.5 });
//! ```

pub mod album;
mod catalog;
mod command;
pub mod config;
mod device;
mod error;
mod session;
mod state;
mod store;
pub mod time_format;
pub mod types;

// Public exports
pub use album::{AlbumSummarizer, AlbumSummary, DefaultAlbum, SummaryLabels};
pub use catalog::Catalog;
pub use command::{next_index, previous_index, reduce, Command};
pub use self::config::{PlaybackSettings, Settings};
pub use device::{DeviceBridge, DeviceEvent, LoadToken, PlaybackDevice};
pub use error::{DeviceError, PlaybackError, Result};
pub use session::PlaybackSession;
pub use state::{PlaybackState, Selection, DEFAULT_VOLUME};
pub use store::{Listener, PlaybackStore, SubscriptionId};
pub use types::Track;
