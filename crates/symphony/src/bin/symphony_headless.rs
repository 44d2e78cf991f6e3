//! # Symphony Headless
//!
//! Runs the simulation without a window: a scripted pointer circles the
//! screen, a reader thread consumes published frames the way a renderer
//! would, and frame stats are logged once per simulated second.
//!
//! ## CRITICAL REQUIREMENTS
//! - NO GPU
//! - NO WINDOW
//!
//! ```bash
//! RUST_LOG=symphony=debug symphony_headless --config symphony.toml \
//!     --preset firework --seconds 20 --seed 7
//! ```

use std::f32::consts::TAU;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use crossbeam_channel::{bounded, TrySendError};
use symphony::{PointerInput, PresetId, SharedFrame, Simulation, SimulationConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line options.
struct Args {
    config: Option<PathBuf>,
    preset: PresetId,
    seconds: u32,
    seed: Option<u64>,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = Self {
            config: None,
            preset: PresetId::Galaxy,
            seconds: 10,
            seed: None,
        };

        let mut it = std::env::args().skip(1);
        while let Some(flag) = it.next() {
            let mut value = || it.next().ok_or_else(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--config" => args.config = Some(PathBuf::from(value()?)),
                "--preset" => args.preset = PresetId::from_name(&value()?),
                "--seconds" => {
                    args.seconds = value()?
                        .parse()
                        .map_err(|e| format!("--seconds: {e}"))?;
                }
                "--seed" => {
                    args.seed = Some(value()?.parse().map_err(|e| format!("--seed: {e}"))?);
                }
                other => return Err(format!("unknown argument {other}")),
            }
        }
        Ok(args)
    }
}

/// Pointer position and buttons at simulated time `t`.
///
/// Circles the centre, holding left for two seconds of every five and
/// double-clicking right once at t = 6 s.
fn scripted_pointer(t: f32, width: f32, height: f32) -> PointerInput {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let angle = t * TAU / 8.0;
    let phase = t % 5.0;
    let click = |at: f32| (t - at).abs() < 0.5 / 60.0;

    PointerInput {
        x: cx + angle.cos() * height * 0.3,
        y: cy + angle.sin() * height * 0.3,
        left_down: phase < 2.0,
        right_pressed: click(6.0) || click(6.1),
        time: f64::from(t),
        ..PointerInput::default()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match Args::parse() {
        Ok(args) => args,
        Err(msg) => {
            error!("{msg}");
            eprintln!(
                "usage: symphony_headless [--config PATH] [--preset NAME] [--seconds N] [--seed N]"
            );
            return ExitCode::FAILURE;
        }
    };

    let mut config = args
        .config
        .as_ref()
        .map_or_else(SimulationConfig::default, SimulationConfig::load_or_default);
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let dt = config.fixed_dt();
    let fps = config.window.fps;
    let (width, height) = (config.window.width as f32, config.window.height as f32);

    let mut sim = match Simulation::try_new(config) {
        Ok(sim) => sim,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    sim.apply_preset(args.preset);

    let shared = SharedFrame::new();
    let (notify, frames) = bounded::<()>(1);
    let reader = {
        let shared = std::sync::Arc::clone(&shared);
        thread::spawn(move || {
            let mut drawn = 0_u64;
            let mut peak = 0_usize;
            while frames.recv().is_ok() {
                let frame = shared.read();
                peak = peak.max(frame.instances.len());
                drawn += 1;
            }
            (drawn, peak)
        })
    };

    let ticks = u64::from(args.seconds) * u64::from(fps);
    for tick in 1..=ticks {
        let t = tick as f32 * dt;
        sim.submit_input(scripted_pointer(t, width, height));
        sim.advance(dt);
        sim.publish(&shared);

        // The reader is always at most one frame behind; a full slot just
        // means it has not caught up yet.
        if let Err(TrySendError::Disconnected(())) = notify.try_send(()) {
            break;
        }

        if tick % u64::from(fps) == 0 {
            let stats = sim.stats();
            info!(
                second = tick / u64::from(fps),
                particles = stats.particles,
                capacity = stats.capacity,
                spawned = stats.spawned,
                expired = stats.expired,
                attractor_mass = stats.attractor_mass,
                preset = %stats.preset,
                quality = %stats.quality,
                "frame stats"
            );
        }
    }
    drop(notify);

    match reader.join() {
        Ok((drawn, peak)) => {
            info!(published = shared.published(), drawn, peak, "headless run finished");
            ExitCode::SUCCESS
        }
        Err(_) => {
            error!("frame reader panicked");
            ExitCode::FAILURE
        }
    }
}
