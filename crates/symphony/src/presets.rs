//! # Presets
//!
//! A preset is immutable data: a palette, an emitter configuration and a
//! seeding routine that bulk-creates the opening particle field.
//!
//! | Id | Name     | Seeded | Emitter pattern / rate |
//! |----|----------|--------|------------------------|
//! | 0  | Galaxy   | 500    | center / 150           |
//! | 1  | Firework | 5x100  | center / 200           |
//! | 2  | Swarm    | 800    | random / 100           |
//! | 3  | Fountain | 300    | bottom / 180           |
//! | 4  | Chaos    | 1000   | edges / 250            |

use std::f32::consts::TAU;
use std::fmt;

use rand::Rng;
use symphony_core::World;
use tracing::warn;

use crate::palette::{self, ColorPalette, Gradient};
use crate::particle::ParticleSeed;
use crate::rng::RngExt;
use crate::systems::{Bounds, EmitterConfig, SpawnPattern};

/// Preset identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresetId {
    /// Spiral around the centre.
    #[default]
    Galaxy,
    /// Radial bursts.
    Firework,
    /// Loose cloud.
    Swarm,
    /// Upward jet under gravity.
    Fountain,
    /// Everything everywhere.
    Chaos,
}

impl PresetId {
    /// All presets in id order.
    pub const ALL: [Self; 5] = [
        Self::Galaxy,
        Self::Firework,
        Self::Swarm,
        Self::Fountain,
        Self::Chaos,
    ];

    /// Preset by id. Out-of-range ids fall back to Galaxy.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_else(|| {
            warn!(index, "unknown preset id, using galaxy");
            Self::Galaxy
        })
    }

    /// Preset by case-insensitive name. Unknown names fall back to Galaxy.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                warn!(name, "unknown preset name, using galaxy");
                Self::Galaxy
            })
    }

    /// Zero-based id.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Galaxy => "Galaxy",
            Self::Firework => "Firework",
            Self::Swarm => "Swarm",
            Self::Fountain => "Fountain",
            Self::Chaos => "Chaos",
        }
    }

    /// One-line description for menus.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Galaxy => "Spiral galaxy with central attractor",
            Self::Firework => "Colorful firework explosions with gravity",
            Self::Swarm => "Organic swarm behavior following the mouse",
            Self::Fountain => "Water fountain shooting upwards with gravity",
            Self::Chaos => "Chaotic particles with random colors and velocities",
        }
    }

    /// Colours.
    #[must_use]
    pub const fn palette(self) -> ColorPalette {
        match self {
            Self::Galaxy => palette::GALAXY,
            Self::Firework => palette::FIREWORK,
            Self::Swarm => palette::SWARM,
            Self::Fountain => palette::FOUNTAIN,
            Self::Chaos => palette::CHAOS,
        }
    }

    /// Emitter settings that take over after seeding.
    #[must_use]
    pub fn emitter(self) -> EmitterConfig {
        let (pattern, rate, size, ttl, vel) = match self {
            Self::Galaxy => (SpawnPattern::Center, 150.0, (1.5, 4.0), (4.0, 7.0), 30.0),
            Self::Firework => (SpawnPattern::Center, 200.0, (2.0, 5.0), (1.5, 3.0), 150.0),
            Self::Swarm => (SpawnPattern::Random, 100.0, (1.0, 3.0), (5.0, 8.0), 20.0),
            Self::Fountain => (SpawnPattern::Bottom, 180.0, (2.0, 4.0), (2.0, 4.0), 80.0),
            Self::Chaos => (SpawnPattern::Edges, 250.0, (1.0, 6.0), (2.0, 5.0), 100.0),
        };
        EmitterConfig {
            gradient: self.palette().primary,
            pattern,
            rate,
            min_size: size.0,
            max_size: size.1,
            min_ttl: ttl.0,
            max_ttl: ttl.1,
            min_vel: -vel,
            max_vel: vel,
        }
    }

    /// Bulk-creates the opening particle field, stopping at `limit`
    /// particles or when the world is full.
    ///
    /// # Returns
    ///
    /// Number of particles created.
    pub fn seed<R: Rng + ?Sized>(
        self,
        world: &mut World,
        bounds: Bounds,
        rng: &mut R,
        limit: usize,
    ) -> usize {
        let mut sink = Sink {
            world,
            limit,
            spawned: 0,
        };
        let palette = self.palette();
        match self {
            Self::Galaxy => seed_galaxy(&mut sink, bounds, rng, &palette),
            Self::Firework => seed_firework(&mut sink, bounds, rng, &palette),
            Self::Swarm => seed_swarm(&mut sink, bounds, rng),
            Self::Fountain => seed_fountain(&mut sink, bounds, rng, &palette),
            Self::Chaos => seed_chaos(&mut sink, bounds, rng, &palette),
        }
        sink.spawned
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extra colours a firework burst may pick besides the palette's two.
pub const FIREWORK_EXTRA: [[u8; 3]; 3] = [[50, 255, 100], [100, 180, 255], [255, 255, 255]];

/// Fixed swarm gradient.
pub const SWARM_GRADIENT: Gradient = Gradient::new([50, 255, 150, 255], [100, 200, 100, 0]);

struct Sink<'w> {
    world: &'w mut World,
    limit: usize,
    spawned: usize,
}

impl Sink<'_> {
    /// False once nothing more fits.
    fn push(&mut self, seed: &ParticleSeed) -> bool {
        if self.spawned >= self.limit {
            return false;
        }
        if self.world.spawn_with(seed.builder()).is_none() {
            self.limit = self.spawned;
            return false;
        }
        self.spawned += 1;
        true
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, p: f32, palette: &ColorPalette) -> Gradient {
    if rng.chance(p) {
        palette.alternate
    } else {
        palette.primary
    }
}

#[allow(clippy::cast_precision_loss)]
fn seed_galaxy<R: Rng + ?Sized>(
    sink: &mut Sink<'_>,
    bounds: Bounds,
    rng: &mut R,
    palette: &ColorPalette,
) {
    let (cx, cy) = bounds.center();
    for i in 0..500 {
        let angle = i as f32 * 0.1;
        let radius = i as f32 * 0.5;
        let speed = 30.0 + rng.unit() * 20.0;
        let gradient = pick(rng, 0.3, palette);
        let ttl = 8.0 + rng.unit() * 4.0;
        let size = 2.0 + rng.unit() * 2.0;

        let seed = ParticleSeed {
            position: (cx + angle.cos() * radius, cy + angle.sin() * radius),
            velocity: (-angle.sin() * speed, angle.cos() * speed),
            acceleration: (0.0, 0.0),
            gradient,
            ttl,
            radius: size,
            end_radius: 0.5,
        };
        if !sink.push(&seed) {
            return;
        }
    }
}

fn seed_firework<R: Rng + ?Sized>(
    sink: &mut Sink<'_>,
    bounds: Bounds,
    rng: &mut R,
    palette: &ColorPalette,
) {
    let [pr, pg, pb, _] = palette.primary.start;
    let [ar, ag, ab, _] = palette.alternate.start;
    let choices = [
        [pr, pg, pb],
        [ar, ag, ab],
        FIREWORK_EXTRA[0],
        FIREWORK_EXTRA[1],
        FIREWORK_EXTRA[2],
    ];

    for _ in 0..5 {
        let bx = rng.unit() * bounds.width;
        let by = bounds.height * 0.2 + rng.unit() * bounds.height * 0.4;
        let gradient = Gradient::fade(choices[rng.gen_range(0..choices.len())]);

        for _ in 0..100 {
            let angle = rng.unit() * TAU;
            let speed = 50.0 + rng.unit() * 150.0;
            let ttl = 1.5 + rng.unit() * 1.5;
            let size = 2.0 + rng.unit() * 3.0;

            let seed = ParticleSeed {
                position: (bx, by),
                velocity: (angle.cos() * speed, angle.sin() * speed - 50.0),
                acceleration: (0.0, 100.0),
                gradient,
                ttl,
                radius: size,
                end_radius: 0.5,
            };
            if !sink.push(&seed) {
                return;
            }
        }
    }
}

fn seed_swarm<R: Rng + ?Sized>(sink: &mut Sink<'_>, bounds: Bounds, rng: &mut R) {
    let (cx, cy) = bounds.center();
    for _ in 0..800 {
        let position = (cx + rng.jitter(200.0), cy + rng.jitter(200.0));
        let velocity = (rng.jitter(50.0), rng.jitter(50.0));
        let ttl = 10.0 + rng.unit() * 5.0;
        let size = 3.0 + rng.unit() * 2.0;

        let seed = ParticleSeed {
            position,
            velocity,
            acceleration: (0.0, 0.0),
            gradient: SWARM_GRADIENT,
            ttl,
            radius: size,
            end_radius: 1.0,
        };
        if !sink.push(&seed) {
            return;
        }
    }
}

fn seed_fountain<R: Rng + ?Sized>(
    sink: &mut Sink<'_>,
    bounds: Bounds,
    rng: &mut R,
    palette: &ColorPalette,
) {
    let (cx, _) = bounds.center();
    for _ in 0..300 {
        let position = (cx + rng.jitter(20.0), bounds.height - 50.0);
        let velocity = (rng.jitter(80.0), -200.0 - rng.unit() * 150.0);
        let gradient = pick(rng, 0.2, palette);
        let ttl = 2.0 + rng.unit() * 2.0;
        let size = 3.0 + rng.unit() * 2.0;

        let seed = ParticleSeed {
            position,
            velocity,
            acceleration: (0.0, 150.0),
            gradient,
            ttl,
            radius: size,
            end_radius: 1.0,
        };
        if !sink.push(&seed) {
            return;
        }
    }
}

fn seed_chaos<R: Rng + ?Sized>(
    sink: &mut Sink<'_>,
    bounds: Bounds,
    rng: &mut R,
    palette: &ColorPalette,
) {
    for _ in 0..1000 {
        let position = (rng.unit() * bounds.width, rng.unit() * bounds.height);
        let velocity = (rng.jitter(300.0), rng.jitter(300.0));
        let roll = rng.unit();
        let gradient = if roll < 0.4 {
            palette.primary
        } else if roll < 0.8 {
            palette.alternate
        } else {
            Gradient::fade([
                rng.gen_range(128..=255),
                rng.gen(),
                rng.gen_range(128..=255),
            ])
        };
        let ttl = 3.0 + rng.unit() * 4.0;
        let size = 1.0 + rng.unit() * 4.0;

        let seed = ParticleSeed {
            position,
            velocity,
            acceleration: (0.0, 0.0),
            gradient,
            ttl,
            radius: size,
            end_radius: 0.5,
        };
        if !sink.push(&seed) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use symphony_core::{mask, Color, Lifetime, Size, Velocity};

    const BOUNDS: Bounds = Bounds::new(1280.0, 720.0);

    fn seeded(preset: PresetId, limit: usize) -> (World, usize) {
        let mut world = World::new(2048);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let n = preset.seed(&mut world, BOUNDS, &mut rng, limit);
        (world, n)
    }

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(PresetId::from_index(4), PresetId::Chaos);
        assert_eq!(PresetId::from_index(99), PresetId::Galaxy);
        assert_eq!(PresetId::from_name("fountain"), PresetId::Fountain);
        assert_eq!(PresetId::from_name(" FIREWORK "), PresetId::Firework);
        assert_eq!(PresetId::from_name("nebula"), PresetId::Galaxy);
        for (i, p) in PresetId::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
            assert!(!p.description().is_empty());
        }
        assert_eq!(PresetId::Swarm.to_string(), "Swarm");
    }

    #[test]
    fn test_seed_counts() {
        let expected = [500, 500, 800, 300, 1000];
        for (preset, want) in PresetId::ALL.into_iter().zip(expected) {
            let (world, n) = seeded(preset, usize::MAX);
            assert_eq!(n, want, "{preset}");
            assert_eq!(world.count_matching(mask::FULL_PARTICLE), want);
        }
    }

    #[test]
    fn test_seed_respects_limit_and_world_size() {
        let (world, n) = seeded(PresetId::Chaos, 123);
        assert_eq!(n, 123);
        assert_eq!(world.alive_count(), 123);

        let mut small = World::new(64);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(PresetId::Swarm.seed(&mut small, BOUNDS, &mut rng, 10_000), 64);
    }

    fn gradients(world: &World) -> Vec<([u8; 4], [u8; 4])> {
        world
            .filter_by_mask(mask::PARTICLE)
            .into_iter()
            .map(|id| {
                let c: &Color = world.component(id);
                (c.start(), c.end())
            })
            .collect()
    }

    #[test]
    fn test_galaxy_uses_both_palette_gradients() {
        let (world, _) = seeded(PresetId::Galaxy, usize::MAX);
        let p = palette::GALAXY;
        let all = gradients(&world);
        assert!(all
            .iter()
            .all(|&g| g == (p.primary.start, p.primary.end) || g == (p.alternate.start, p.alternate.end)));
        assert!(all.iter().any(|&g| g.0 == p.alternate.start));
        assert!(all.iter().any(|&g| g.0 == p.primary.start));
    }

    #[test]
    fn test_firework_colours_come_from_burst_table() {
        let (world, _) = seeded(PresetId::Firework, usize::MAX);
        let p = palette::FIREWORK;
        let mut allowed: Vec<[u8; 3]> = FIREWORK_EXTRA.to_vec();
        allowed.push([p.primary.start[0], p.primary.start[1], p.primary.start[2]]);
        allowed.push([p.alternate.start[0], p.alternate.start[1], p.alternate.start[2]]);

        for (start, end) in gradients(&world) {
            let rgb = [start[0], start[1], start[2]];
            assert!(allowed.contains(&rgb), "{rgb:?}");
            assert_eq!(start[3], 255);
            assert_eq!(end, [rgb[0], rgb[1], rgb[2], 0]);
        }
    }

    #[test]
    fn test_swarm_ranges() {
        let (world, _) = seeded(PresetId::Swarm, usize::MAX);
        for id in world.filter_by_mask(mask::PARTICLE) {
            let v: &Velocity = world.component(id);
            assert!(v.x.abs() <= 25.0 && v.y.abs() <= 25.0);
            let life: &Lifetime = world.component(id);
            assert!((10.0..=15.0).contains(&life.ttl));
            let size: &Size = world.component(id);
            assert!((3.0..=5.0).contains(&size.radius));
            assert!((size.end_size - 1.0).abs() < f32::EPSILON);
            let c: &Color = world.component(id);
            assert_eq!(c.start(), SWARM_GRADIENT.start);
        }
    }

    #[test]
    fn test_fountain_shoots_up() {
        let (world, _) = seeded(PresetId::Fountain, usize::MAX);
        for id in world.filter_by_mask(mask::PARTICLE) {
            let v: &Velocity = world.component(id);
            assert!(v.y <= -200.0 && v.y >= -350.0);
            assert!(v.x.abs() <= 40.0);
        }
    }

    #[test]
    fn test_chaos_neon_channels() {
        let (world, _) = seeded(PresetId::Chaos, usize::MAX);
        let p = palette::CHAOS;
        let mut neon = 0;
        for (start, end) in gradients(&world) {
            if start == p.primary.start || start == p.alternate.start {
                continue;
            }
            neon += 1;
            assert!(start[0] >= 128 && start[2] >= 128);
            assert_eq!(start[3], 255);
            assert_eq!(end[3], 0);
        }
        assert!(neon > 0);
    }

    #[test]
    fn test_emitter_settings() {
        let e = PresetId::Fountain.emitter();
        assert_eq!(e.pattern, SpawnPattern::Bottom);
        assert!((e.rate - 180.0).abs() < f32::EPSILON);
        assert!((e.min_vel + 80.0).abs() < f32::EPSILON);
        assert_eq!(e.gradient, palette::FOUNTAIN.primary);
        assert_eq!(PresetId::Chaos.emitter().pattern, SpawnPattern::Edges);
    }
}
