//! # Simulation
//!
//! Owns the world, the six systems and the random streams, and advances
//! them together one fixed step at a time.
//!
//! ```text
//! advance(dt):
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. input     pointer -> attractor position + mass            │
//! │    (apply preset / quality requests raised by keys)          │
//! │ 2. emitter   spawn up to the effective capacity              │
//! │ 3. gravity   reset acceleration, sum attractor pulls         │
//! │ 4. physics   integrate, damp, clamp, wrap                    │
//! │ 5. lifetime  age, despawn expired                            │
//! │ 6. color     interpolate colour and radius                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! No state from inside a tick is visible outside it: [`Simulation::publish`]
//! and the read accessors only run between calls to `advance`.

use symphony_core::{mask, World};
use tracing::{info, trace, warn};

use crate::config::SimulationConfig;
use crate::error::ConfigResult;
use crate::frame::SharedFrame;
use crate::palette::ColorPalette;
use crate::presets::PresetId;
use crate::quality::{QualityLevel, QualitySettings};
use crate::render::{self, FrameStats, ParticleInstance};
use crate::rng::RngStreams;
use crate::systems::{
    Bounds, ColorSystem, EmitterConfig, EmitterSystem, GravitySystem, InputSystem,
    LifetimeSystem, PhysicsSystem, PointerInput, System, TickContext,
};

/// The particle simulation.
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    bounds: Bounds,
    rng: RngStreams,
    tick: u64,
    preset: PresetId,
    quality: QualityLevel,

    input: InputSystem,
    emitter: EmitterSystem,
    gravity: GravitySystem,
    physics: PhysicsSystem,
    lifetime: LifetimeSystem,
    color: ColorSystem,

    stats: FrameStats,
}

impl Simulation {
    /// Builds an empty simulation from `config`.
    ///
    /// The emitter starts from the `[particles]` defaults and the quality
    /// tier from `quality.default`. No preset is seeded until
    /// [`Simulation::apply_preset`] is called.
    ///
    /// # Panics
    ///
    /// Panics if `particles.world_capacity` is zero or exceeds `u32::MAX`.
    /// Use [`Simulation::try_new`] to validate first.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(config: SimulationConfig) -> Self {
        let quality = config.quality.default;
        let settings = config.quality.get(quality);
        let physics = &config.physics;

        let sim = Self {
            world: World::new(config.particles.world_capacity),
            bounds: Bounds::new(config.window.width as f32, config.window.height as f32),
            rng: RngStreams::new(config.seed),
            tick: 0,
            preset: PresetId::default(),
            quality,
            input: InputSystem::new(),
            emitter: EmitterSystem::new(
                EmitterConfig::from_particles(&config.particles),
                config.particles.max_count,
                settings,
            ),
            gravity: GravitySystem::new(physics.force_scale, physics.min_distance),
            physics: PhysicsSystem::new(physics.damping, physics.max_velocity),
            lifetime: LifetimeSystem::new(),
            color: ColorSystem::new(),
            stats: FrameStats::default(),
            config,
        };

        info!(
            width = sim.bounds.width,
            height = sim.bounds.height,
            capacity = sim.world.capacity(),
            seed = sim.config.seed,
            quality = %quality,
            "simulation created"
        );
        sim
    }

    /// Validates `config`, then builds.
    ///
    /// # Errors
    ///
    /// [`crate::ConfigError::Invalid`] if validation fails.
    pub fn try_new(config: SimulationConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Runs the six systems once, in order, with step `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;

        {
            let mut ctx = TickContext {
                tick: self.tick,
                dt,
                bounds: self.bounds,
                rng: &mut self.rng.emitter,
            };
            self.input.run(&mut ctx, &mut self.world);
        }
        self.apply_requests();

        let mut ctx = TickContext {
            tick: self.tick,
            dt,
            bounds: self.bounds,
            rng: &mut self.rng.emitter,
        };
        let passes: [&mut dyn System; 5] = [
            &mut self.emitter,
            &mut self.gravity,
            &mut self.physics,
            &mut self.lifetime,
            &mut self.color,
        ];
        for pass in passes {
            trace!(tick = ctx.tick, system = pass.name(), "pass");
            pass.run(&mut ctx, &mut self.world);
        }

        self.stats = FrameStats {
            tick: self.tick,
            particles: self.active_particle_count(),
            capacity: self.max_particles(),
            spawned: self.emitter.last_spawned(),
            expired: self.lifetime.last_expired(),
            attractor_mass: self.input.attractor_mass(&self.world),
            quality: self.quality,
            preset: self.preset,
        };
        trace!(
            tick = self.tick,
            spawned = self.stats.spawned,
            expired = self.stats.expired,
            live = self.stats.particles,
            "tick"
        );
    }

    fn apply_requests(&mut self) {
        let requests = self.input.take_requests();
        if let Some(preset) = requests.preset {
            self.apply_preset(preset);
        }
        if requests.cycle_quality {
            self.set_quality_level(self.quality.next());
        }
    }

    /// System names in the order `advance` runs them.
    #[must_use]
    pub fn pipeline(&self) -> [&'static str; 6] {
        [
            self.input.name(),
            self.emitter.name(),
            self.gravity.name(),
            self.physics.name(),
            self.lifetime.name(),
            self.color.name(),
        ]
    }

    /// Queues pointer and key state for the next `advance`.
    pub fn submit_input(&mut self, input: PointerInput) {
        self.input.submit(input);
    }

    /// Removes every Particle-tagged entity, seeds the preset's opening
    /// field and switches the emitter to the preset's settings.
    ///
    /// Seeding stops at the effective capacity. The attractor survives.
    ///
    /// # Returns
    ///
    /// Number of particles seeded.
    pub fn apply_preset(&mut self, preset: PresetId) -> usize {
        let cleared = self.world.clear_mask(mask::PARTICLE);
        let limit = self.emitter.ceiling(&self.world);
        let seeded = preset.seed(&mut self.world, self.bounds, &mut self.rng.presets, limit);

        self.emitter.configure(preset.emitter());
        self.emitter.reset_timer();
        self.preset = preset;

        info!(preset = %preset, cleared, seeded, "applied preset");
        seeded
    }

    /// [`Simulation::apply_preset`] by id; unknown ids mean Galaxy.
    pub fn apply_preset_index(&mut self, index: usize) -> usize {
        self.apply_preset(PresetId::from_index(index))
    }

    /// [`Simulation::apply_preset`] by name; unknown names mean Galaxy.
    pub fn apply_preset_name(&mut self, name: &str) -> usize {
        self.apply_preset(PresetId::from_name(name))
    }

    /// Creates or moves the interaction point and sets its mass.
    ///
    /// Positive mass attracts, negative repels, zero is inert.
    pub fn set_attractor(&mut self, x: f32, y: f32, mass: f32) {
        if !self.input.set_attractor(&mut self.world, x, y, mass) {
            warn!("world full, attractor not created");
        }
    }

    /// Switches quality tier: capacity cap and spawn multiplier.
    ///
    /// Particles above a lowered cap are not removed; they expire normally.
    pub fn set_quality_level(&mut self, level: QualityLevel) {
        let settings = self.config.quality.get(level);
        self.emitter.set_quality(settings);
        self.quality = level;
        info!(
            quality = %level,
            max_particles = settings.max_particles,
            spawn_multiplier = settings.spawn_multiplier,
            "quality changed"
        );
    }

    /// [`Simulation::set_quality_level`] by index; unknown indices mean Medium.
    pub fn set_quality_index(&mut self, index: usize) {
        if index >= QualityLevel::ALL.len() {
            warn!(index, "unknown quality level, using medium");
        }
        self.set_quality_level(QualityLevel::from_index(index));
    }

    /// Sets the configured ceiling; the tier cap still applies.
    pub fn set_max_particles(&mut self, max: usize) {
        self.emitter.set_max_particles(max);
    }

    /// Replaces the emitter configuration until the next preset switch.
    pub fn configure_emitter(&mut self, config: EmitterConfig) {
        self.emitter.configure(config);
    }

    /// Live Particle-tagged entities.
    #[must_use]
    pub fn active_particle_count(&self) -> usize {
        self.world.count_matching(mask::PARTICLE)
    }

    /// Effective ceiling: `min(configured max, tier cap)`, and never more
    /// than the world can hold beside the interaction point.
    #[must_use]
    pub fn max_particles(&self) -> usize {
        self.emitter.ceiling(&self.world)
    }

    /// Ceiling before the tier cap.
    #[must_use]
    pub fn configured_max_particles(&self) -> usize {
        self.emitter.max_particles()
    }

    /// Active tier.
    #[must_use]
    pub fn quality_level(&self) -> QualityLevel {
        self.quality
    }

    /// Active tier settings, including the renderer flags.
    #[must_use]
    pub fn quality_settings(&self) -> &QualitySettings {
        self.emitter.quality()
    }

    /// Last applied preset (Galaxy before any).
    #[must_use]
    pub fn preset(&self) -> PresetId {
        self.preset
    }

    /// Colours of the active preset.
    #[must_use]
    pub fn palette(&self) -> ColorPalette {
        self.preset.palette()
    }

    /// Emitter settings in effect.
    #[must_use]
    pub fn emitter_config(&self) -> &EmitterConfig {
        self.emitter.config()
    }

    /// Counters from the last `advance`.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Ticks advanced so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The entity world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for hosts and tests.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// World rectangle.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Configuration the simulation was built from.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Refills `out` with every renderable entity.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        render::write_instances(&self.world, out);
    }

    /// Publishes the current tick's instances and stats to `shared`.
    pub fn publish(&self, shared: &SharedFrame) {
        shared.publish(|frame| {
            frame.stats = self.stats;
            render::write_instances(&self.world, &mut frame.instances);
        });
    }
}
