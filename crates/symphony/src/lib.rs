//! # Particle Symphony
//!
//! An interactive 2D particle field on top of `symphony_core`:
//! - Five presets that seed an opening field and drive the emitter
//! - A pointer-driven attractor with hold, lock and repel modes
//! - Three quality tiers trading particle count for frame rate
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   PointerInput   ┌────────────────────────────┐
//! │     Host     │ ───────────────> │         Simulation         │
//! │ window, GPU, │                  │  input -> emitter ->       │
//! │ audio, UI    │ <─────────────── │  gravity -> physics ->     │
//! └──────────────┘   SharedFrame    │  lifetime -> color         │
//!                                   └─────────────┬──────────────┘
//!                                                 │
//!                                          symphony_core::World
//! ```
//!
//! The host owns the clock and passes a fixed `dt` to
//! [`Simulation::advance`]; the simulation never reads wall time.
//!
//! ## Example
//!
//! ```rust,ignore
//! use symphony::{PresetId, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default());
//! sim.apply_preset(PresetId::Galaxy);
//! sim.set_attractor(640.0, 360.0, 5_000.0);
//! for _ in 0..60 {
//!     sim.advance(1.0 / 60.0);
//! }
//! assert!(sim.active_particle_count() <= sim.max_particles());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod frame;
pub mod palette;
pub mod particle;
pub mod presets;
pub mod quality;
pub mod render;
pub mod rng;
pub mod simulation;
pub mod systems;

pub use config::{ParticleConfig, PhysicsConfig, SimulationConfig, WindowConfig};
pub use error::{ConfigError, ConfigResult};
pub use frame::{Frame, SharedFrame};
pub use palette::{ColorPalette, Gradient};
pub use particle::ParticleSeed;
pub use presets::PresetId;
pub use quality::{QualityLevel, QualitySettings, QualityTable};
pub use render::{FrameStats, ParticleInstance};
pub use rng::{RngExt, RngStreams};
pub use simulation::Simulation;
pub use systems::{
    Bounds, EmitterConfig, InputRequests, LockMode, PointerInput, SpawnPattern, System,
    TickContext,
};

/// The ECS kernel.
pub use symphony_core as kernel;
