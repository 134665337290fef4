//! # Analog Clock Application Entry Point
//!
//! This binary plays the host for the clock core: it loads the configuration,
//! sizes the view, restores the rotation counter and then asks the view for a
//! frame once per second, rendering each one as terminal text.
//!
//! Usage:
//!   analog-clock --stdout           render the current time once and exit
//!   analog-clock [--ticks N]        redraw every second (N frames, or until Ctrl+C)
//!   analog-clock --config PATH      use a config file other than clock-config.toml

// Test modules
#[cfg(test)]
mod tests;

use analog_clock_lib::{
    config::Config, renderer::draw_ascii, state::RotationState, view::ClockView, TimeSample,
};
use anyhow::{bail, Context};
use std::{env, io, path::PathBuf, time::Duration};
use tokio::time::{Interval, MissedTickBehavior};

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Render a single frame and exit
    development_mode: bool,
    /// Stop the tick loop after this many frames
    ticks: Option<u64>,
    config_path: Option<PathBuf>,
}

impl Options {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--stdout" => options.development_mode = true,
                "--ticks" => {
                    let value = args.next().context("--ticks needs a frame count")?;
                    let ticks = value
                        .parse::<u64>()
                        .with_context(|| format!("invalid frame count {value:?}"))?;
                    options.ticks = Some(ticks);
                }
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    options.config_path = Some(PathBuf::from(path));
                }
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(options)
    }
}

/// One tick per second. A late tick is skipped, not replayed in a burst.
fn tick_interval() -> Interval {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Whether the finished Ctrl+C wait should stop the loop. A handler that could
/// not be installed is logged and the clock keeps running.
fn interrupted(signal: io::Result<()>, frames: u64) -> bool {
    match signal {
        Ok(()) => {
            log::info!("Interrupted after {} frames", frames);
            true
        }
        Err(e) => {
            log::warn!("Ctrl+C handler unavailable, continuing without it: {}", e);
            false
        }
    }
}

/// Redraw once per second until `limit` frames are shown or Ctrl+C arrives.
async fn run_ticks(view: &ClockView, width: u32, height: u32, limit: Option<u64>) {
    let mut interval = tick_interval();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut listening = true;

    let mut frames = 0u64;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let frame = view.on_tick(&TimeSample::now());
                // Clear the terminal and home the cursor before each frame
                print!("\x1B[2J\x1B[H");
                draw_ascii(&frame, width, height);
                frames += 1;
                if limit.is_some_and(|limit| frames >= limit) {
                    break;
                }
            }
            signal = &mut shutdown, if listening => {
                if interrupted(signal, frames) {
                    break;
                }
                listening = false;
            }
        }
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse(env::args().skip(1))?;
    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    let mut view = ClockView::from_config(&config);
    view.restore_rotation(RotationState::load_from_path(&config.state.path));

    let (width, height) = (config.display.width, config.display.height);
    let orientation = config
        .display
        .orientation
        .resolve(width as f32, height as f32);
    let viewport = view.on_size_or_orientation_changed(width as f32, height as f32, orientation);
    log::debug!("Viewport: {:?}", viewport);

    // Development mode: one ASCII frame for the current time
    if options.development_mode {
        draw_ascii(&view.on_tick(&TimeSample::now()), width, height);
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_ticks(&view, width, height, options.ticks));

    let saved = view.save_instance_state();
    if let Err(e) = saved.save_to_path(&config.state.path) {
        log::warn!("Could not persist rotation {}: {}", saved.value(), e);
    }

    Ok(())
}
