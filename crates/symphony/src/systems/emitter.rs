//! Rate-paced particle spawning.

use rand::Rng;
use serde::{Deserialize, Serialize};
use symphony_core::{mask, World};

use super::{Bounds, System, TickContext};
use crate::config::ParticleConfig;
use crate::palette::Gradient;
use crate::particle::ParticleSeed;
use crate::quality::QualitySettings;
use crate::rng::RngExt;

/// World slots the emitter never fills.
pub const RESERVED_SLOTS: usize = 1;

/// Slack on the spawn timer so an interval that lands exactly on a tick
/// boundary is not lost to rounding.
const TIMER_EPSILON: f64 = 1e-9;

/// Where new particles appear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnPattern {
    /// Anywhere on screen.
    #[default]
    Random,
    /// A 100x100 square around the centre.
    Center,
    /// A 200-wide strip, 50 units above the bottom edge.
    Bottom,
    /// A random point on a random edge.
    Edges,
}

impl SpawnPattern {
    /// Draws a spawn point.
    pub fn sample<R: Rng + ?Sized>(self, bounds: Bounds, rng: &mut R) -> (f32, f32) {
        let (cx, cy) = bounds.center();
        match self {
            Self::Random => (rng.unit() * bounds.width, rng.unit() * bounds.height),
            Self::Center => (cx + rng.jitter(100.0), cy + rng.jitter(100.0)),
            Self::Bottom => (cx + rng.jitter(200.0), bounds.height - 50.0),
            Self::Edges => match rng.gen_range(0..4) {
                0 => (rng.unit() * bounds.width, 0.0),
                1 => (rng.unit() * bounds.width, bounds.height),
                2 => (0.0, rng.unit() * bounds.height),
                _ => (bounds.width, rng.unit() * bounds.height),
            },
        }
    }
}

/// What the emitter spawns and how fast.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Colour over life.
    pub gradient: Gradient,
    /// Spawn placement.
    pub pattern: SpawnPattern,
    /// Base rate in particles per second, before the quality multiplier.
    pub rate: f32,
    /// Smallest spawn radius.
    pub min_size: f32,
    /// Largest spawn radius.
    pub max_size: f32,
    /// Shortest lifetime.
    pub min_ttl: f32,
    /// Longest lifetime.
    pub max_ttl: f32,
    /// Lower bound for each velocity axis.
    pub min_vel: f32,
    /// Upper bound for each velocity axis.
    pub max_vel: f32,
}

impl EmitterConfig {
    /// End radius as a fraction of the spawn radius.
    pub const SHRINK: f32 = 0.3;

    /// Emitter derived from the particle defaults.
    #[must_use]
    pub fn from_particles(particles: &ParticleConfig) -> Self {
        Self {
            rate: particles.spawn_rate,
            min_size: particles.default_size * 2.0 / 3.0,
            max_size: particles.default_size * 5.0 / 3.0,
            min_ttl: particles.default_ttl * 0.6,
            max_ttl: particles.default_ttl,
            ..Self::default()
        }
    }

    /// Draws one particle.
    pub fn sample<R: Rng + ?Sized>(&self, bounds: Bounds, rng: &mut R) -> ParticleSeed {
        let position = self.pattern.sample(bounds, rng);
        let vx = rng.between(self.min_vel, self.max_vel);
        let vy = rng.between(self.min_vel, self.max_vel);
        let radius = rng.between(self.min_size, self.max_size);
        let ttl = rng.between(self.min_ttl, self.max_ttl);

        ParticleSeed {
            position,
            velocity: (vx, vy),
            acceleration: (0.0, 0.0),
            gradient: self.gradient,
            ttl,
            radius,
            end_radius: radius * Self::SHRINK,
        }
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            pattern: SpawnPattern::Random,
            rate: 100.0,
            min_size: 2.0,
            max_size: 5.0,
            min_ttl: 3.0,
            max_ttl: 5.0,
            min_vel: -50.0,
            max_vel: 50.0,
        }
    }
}

/// Spawns particles at `rate * multiplier` per second, up to
/// `min(max_particles, tier cap)` live particles.
///
/// The timer keeps accumulating while the ceiling is reached, so a
/// backlog drains as soon as particles expire. The backlog is unbounded:
/// after a long stall at the ceiling, raising the ceiling releases the
/// whole backlog in one tick, up to the new ceiling.
///
/// One world slot is always left free for the interaction point, so the
/// ceiling never exceeds `world.capacity() - 1`.
pub struct EmitterSystem {
    config: EmitterConfig,
    max_particles: usize,
    quality: QualitySettings,
    timer: f64,
    last_spawned: usize,
}

impl EmitterSystem {
    /// Creates the pass.
    #[must_use]
    pub fn new(config: EmitterConfig, max_particles: usize, quality: QualitySettings) -> Self {
        Self {
            config,
            max_particles,
            quality,
            timer: 0.0,
            last_spawned: 0,
        }
    }

    /// Replaces the whole emitter configuration.
    pub fn configure(&mut self, config: EmitterConfig) {
        self.config = config;
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Sets the configured ceiling.
    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
    }

    /// The configured ceiling, before the tier cap.
    #[must_use]
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Switches tier settings.
    pub fn set_quality(&mut self, quality: QualitySettings) {
        self.quality = quality;
    }

    /// Active tier settings.
    #[must_use]
    pub fn quality(&self) -> &QualitySettings {
        &self.quality
    }

    /// `min(max_particles, tier cap)`.
    #[must_use]
    pub fn effective_capacity(&self) -> usize {
        self.max_particles.min(self.quality.max_particles)
    }

    /// [`EmitterSystem::effective_capacity`], further bounded by the
    /// world's slots minus the one kept for the interaction point.
    #[must_use]
    pub fn ceiling(&self, world: &World) -> usize {
        self.effective_capacity()
            .min(world.capacity().saturating_sub(RESERVED_SLOTS))
    }

    /// Base rate scaled by the tier multiplier.
    #[must_use]
    pub fn effective_rate(&self) -> f32 {
        self.config.rate * self.quality.spawn_multiplier
    }

    /// Particles spawned by the most recent run.
    #[must_use]
    pub fn last_spawned(&self) -> usize {
        self.last_spawned
    }

    /// Drops any accumulated spawn time.
    pub fn reset_timer(&mut self) {
        self.timer = 0.0;
    }
}

impl System for EmitterSystem {
    fn name(&self) -> &'static str {
        "emitter"
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World) {
        self.last_spawned = 0;
        self.timer += f64::from(ctx.dt);

        let rate = self.effective_rate();
        if rate <= 0.0 {
            return;
        }
        let interval = 1.0 / f64::from(rate);
        let capacity = self.ceiling(world);
        let mut live = world.count_matching(mask::PARTICLE);

        while self.timer + TIMER_EPSILON >= interval && live < capacity {
            self.timer -= interval;
            let seed = self.config.sample(ctx.bounds, &mut *ctx.rng);
            if world.spawn_with(seed.builder()).is_none() {
                break;
            }
            live += 1;
            self.last_spawned += 1;
        }
    }
}
