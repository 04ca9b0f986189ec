//! Layered settings
//!
//! Struct defaults, then an optional TOML file, then `ARIA__`-prefixed
//! environment variables (`ARIA__PLAYBACK__INITIAL_VOLUME=0.5`).

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::album::{AlbumSummarizer, DefaultAlbum, SummaryLabels};
use crate::error::{PlaybackError, Result};
use crate::state::{PlaybackState, DEFAULT_VOLUME};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "ARIA_CONFIG_PATH";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "aria.toml";

const ENV_PREFIX: &str = "ARIA";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub playback: PlaybackSettings,

    /// Words used in album summaries
    #[serde(default)]
    pub labels: SummaryLabels,

    /// Album shown before anything is selected
    #[serde(default)]
    pub default_album: DefaultAlbum,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Volume of a fresh session (0-1)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
        }
    }
}

fn default_initial_volume() -> f64 {
    DEFAULT_VOLUME
}

impl Settings {
    /// Load settings from the resolved config file and the process environment
    pub fn load() -> Result<Self> {
        let path = resolve_config_path();
        Self::build(path.as_deref(), false, None)
    }

    /// Load settings from an explicit config file, which must exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(Some(path.as_ref()), true, None)
    }

    /// Like [`Settings::load`] but falls back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load settings, using defaults");
            Self::default()
        })
    }

    /// Build settings from an optional file and an environment
    ///
    /// `environment` replaces the process environment when given.
    fn build(
        path: Option<&Path>,
        required: bool,
        environment: Option<::config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), required, "reading config file");
            builder = builder.add_source(::config::File::from(path).required(required));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(environment),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "playback.initial_volume must be between 0 and 1, got {}",
                volume
            )));
        }

        for (key, value) in [
            ("labels.track_plural", &self.labels.track_plural),
            ("labels.hour_plural", &self.labels.hour_plural),
        ] {
            if value.trim().is_empty() {
                return Err(PlaybackError::InvalidConfig(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Summarizer using the configured labels and default album
    pub fn summarizer(&self) -> AlbumSummarizer {
        AlbumSummarizer::new(self.labels.clone(), self.default_album.clone())
    }

    /// State a new session starts from
    pub fn initial_state(&self) -> PlaybackState {
        PlaybackState::with_volume(self.playback.initial_volume)
    }
}

/// Resolve the config file from `ARIA_CONFIG_PATH`, else `./aria.toml` if present
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> ::config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_player_wording() {
        let settings = Settings::build(None, false, Some(env_of(&[]))).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.playback.initial_volume, 0.8);
        assert_eq!(settings.labels.track_plural, "canciones");
        assert_eq!(settings.default_album.name, "Once");
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
            [playback]
            initial_volume = 0.5

            [labels]
            track_singular = "track"
            track_plural = "tracks"
            "#,
        );

        let settings = Settings::build(Some(file.path()), true, Some(env_of(&[]))).unwrap();
        assert_eq!(settings.playback.initial_volume, 0.5);
        assert_eq!(settings.labels.track_plural, "tracks");
        // untouched labels keep their defaults
        assert_eq!(settings.labels.minutes, "min");
        assert_eq!(settings.summarizer().labels().track_count(1), "1 track");
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[playback]\ninitial_volume = 0.5\n");
        let env = env_of(&[
            ("ARIA__PLAYBACK__INITIAL_VOLUME", "0.25"),
            ("ARIA__DEFAULT_ALBUM__NAME", "Imaginaerum"),
        ]);

        let settings = Settings::build(Some(file.path()), true, Some(env)).unwrap();
        assert_eq!(settings.playback.initial_volume, 0.25);
        assert_eq!(settings.default_album.name, "Imaginaerum");
        assert_eq!(settings.initial_state().volume, 0.25);
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let env = env_of(&[("ARIA__PLAYBACK__INITIAL_VOLUME", "1.5")]);
        let err = Settings::build(None, false, Some(env)).unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidConfig(_)));
    }

    #[test]
    fn empty_plural_label_is_rejected() {
        let mut settings = Settings::default();
        settings.labels.hour_plural = "  ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(PlaybackError::InvalidConfig(msg)) if msg.contains("hour_plural")
        ));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PlaybackError::Config(_)));
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::build(Some(&path), false, Some(env_of(&[]))).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
