/// Aria CLI - headless playback driver
///
/// Loads a catalog, starts playing from a chosen track and runs a simulated
/// playback clock, logging what a player UI would render.
use anyhow::{bail, Context};
use aria_playback::{
    time_format, Catalog, Command, PlaybackSession, PlaybackState, PlaybackStore, Settings,
};
use clap::Parser;
use std::{path::PathBuf, sync::Arc, thread, time::Duration};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod simulated;

use simulated::SimulatedDevice;

#[derive(Parser)]
#[command(name = "aria-cli")]
#[command(about = "Headless driver for the Aria playback engine", long_about = None)]
struct Cli {
    /// Catalog JSON file
    #[arg(short, long, env = "ARIA_CATALOG")]
    catalog: PathBuf,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of clock ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 1.0)]
    step_secs: f64,

    /// Real milliseconds to sleep between ticks
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,

    /// Catalog index to start from
    #[arg(long, default_value_t = 0)]
    start: usize,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aria_cli=info,aria_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if !cli.step_secs.is_finite() || cli.step_secs <= 0.0 {
        bail!("--step-secs must be a positive number");
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Settings::load().context("failed to load settings")?,
    };

    let catalog = Catalog::from_path(&cli.catalog)
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;
    if cli.start >= catalog.len() {
        bail!(
            "--start {} is out of range for a catalog of {} tracks",
            cli.start,
            catalog.len()
        );
    }

    let device = SimulatedDevice::new(catalog.tracks());
    let mut session = PlaybackSession::new(PlaybackStore::from_settings(&settings), device);

    let summarizer = settings.summarizer();
    let mut now_playing: Option<String> = None;
    session.subscribe(move |state: &Arc<PlaybackState>| {
        let Some(track) = state.current_track() else {
            return;
        };
        if now_playing.as_deref() == Some(track.id.as_str()) {
            return;
        }
        now_playing = Some(track.id.clone());

        let summary = summarizer.summarize_state(state);
        info!(
            index = state.current_index_or_sentinel(),
            title = %track.title,
            artist = %summary.artist,
            "now playing"
        );
        info!(
            album = %summary.name,
            year = %summary.year,
            songs = %summary.song_count,
            duration = %summary.duration,
            favorite = summary.is_favorite,
            "album"
        );
    });

    session.command(Command::PlayFrom {
        tracks: catalog.into_tracks(),
        index: cli.start,
    });

    for tick in 0..cli.ticks {
        session.device_mut().tick(cli.step_secs);
        while let Some((token, event)) = session.device_mut().next_event() {
            session.deliver(token, event);
        }

        let state = session.state();
        debug!(
            tick,
            elapsed = %time_format::format_clock(state.current_time),
            total = %time_format::format_clock(state.duration),
            "clock"
        );

        if cli.tick_ms > 0 {
            thread::sleep(Duration::from_millis(cli.tick_ms));
        }
    }

    let state = session.state();
    info!(
        index = state.current_index_or_sentinel(),
        elapsed = %time_format::format_clock(state.current_time),
        playing = state.is_playing,
        "finished"
    );

    Ok(())
}
