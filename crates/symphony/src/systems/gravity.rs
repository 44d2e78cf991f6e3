//! Inverse-square attraction from every attractor onto every particle.

use symphony_core::{mask, EntityId, World};

use super::{System, TickContext};

/// Rebuilds particle acceleration from the attractors each tick.
///
/// `dist = max(|d|, min_distance)` and `force = mass / dist^2 * force_scale`.
/// The floor keeps the result finite when an attractor sits on a particle.
pub struct GravitySystem {
    force_scale: f32,
    min_distance: f32,
    sources: Vec<(f32, f32, f32)>,
    targets: Vec<EntityId>,
}

impl GravitySystem {
    /// Creates the pass with the given force law constants.
    #[must_use]
    pub fn new(force_scale: f32, min_distance: f32) -> Self {
        Self {
            force_scale,
            min_distance,
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Acceleration contributed by one source at `(ax, ay)` with `mass`
    /// on a particle at `(px, py)`.
    #[inline]
    #[must_use]
    pub fn pull(&self, (px, py): (f32, f32), (ax, ay, mass): (f32, f32, f32)) -> (f32, f32) {
        let dx = ax - px;
        let dy = ay - py;
        let dist = dx.hypot(dy).max(self.min_distance);
        let force = mass / (dist * dist) * self.force_scale;
        (dx / dist * force, dy / dist * force)
    }
}

impl System for GravitySystem {
    fn name(&self) -> &'static str {
        "gravity"
    }

    fn run(&mut self, _ctx: &mut TickContext<'_>, world: &mut World) {
        world.filter_by_mask_into(mask::ATTRACTOR_QUERY, &mut self.targets);
        self.sources.clear();
        for id in &self.targets {
            let idx = id.index() as usize;
            let mass = world.masses.as_slice()[idx].value;
            if mass == 0.0 {
                continue;
            }
            let pos = world.positions.as_slice()[idx];
            self.sources.push((pos.x, pos.y, mass));
        }

        world.filter_by_mask_into(mask::GRAVITY_TARGET, &mut self.targets);
        let positions = world.positions.as_slice();
        let accelerations = world.accelerations.as_mut_slice();
        for id in &self.targets {
            let idx = id.index() as usize;
            let pos = positions[idx];
            let acc = &mut accelerations[idx];
            acc.reset();
            for &source in &self.sources {
                let (x, y) = self.pull((pos.x, pos.y), source);
                acc.add(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleSeed;
    use crate::palette::Gradient;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use symphony_core::{Acceleration, Attractor, EntityBuilder, Mass, Position};

    use crate::systems::Bounds;

    fn particle_at(world: &mut World, x: f32, y: f32, acc: (f32, f32)) -> EntityId {
        let seed = ParticleSeed {
            position: (x, y),
            velocity: (0.0, 0.0),
            acceleration: acc,
            gradient: Gradient::default(),
            ttl: 5.0,
            radius: 3.0,
            end_radius: 1.0,
        };
        world.spawn_with(seed.builder()).unwrap()
    }

    fn attractor_at(world: &mut World, x: f32, y: f32, mass: f32) -> EntityId {
        world
            .spawn_with(
                EntityBuilder::new()
                    .with(Position::new().with(x, y))
                    .with(Mass::new().with_value(mass))
                    .with(Attractor),
            )
            .unwrap()
    }

    fn run(world: &mut World) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ctx = TickContext {
            tick: 1,
            dt: 1.0 / 60.0,
            bounds: Bounds::new(1280.0, 720.0),
            rng: &mut rng,
        };
        GravitySystem::new(500.0, 10.0).run(&mut ctx, world);
    }

    #[test]
    fn test_no_attractors_resets_to_zero() {
        let mut world = World::new(8);
        let p = particle_at(&mut world, 10.0, 10.0, (3.0, 150.0));
        run(&mut world);
        assert_eq!(*world.component::<Acceleration>(p), Acceleration::new());
    }

    #[test]
    fn test_zero_mass_attractor_is_inert() {
        let mut world = World::new(8);
        let p = particle_at(&mut world, 10.0, 10.0, (1.0, 1.0));
        attractor_at(&mut world, 50.0, 10.0, 0.0);
        run(&mut world);
        assert_eq!(*world.component::<Acceleration>(p), Acceleration::new());
    }

    #[test]
    fn test_force_law() {
        let mut world = World::new(8);
        let p = particle_at(&mut world, 0.0, 0.0, (0.0, 0.0));
        attractor_at(&mut world, 100.0, 0.0, 5000.0);
        run(&mut world);

        // 5000 / 100^2 * 500 = 250, all along +x
        let acc = world.component::<Acceleration>(p);
        assert!((acc.x - 250.0).abs() < 1e-3);
        assert!(acc.y.abs() < 1e-6);
    }

    #[test]
    fn test_distance_floor_at_coincidence() {
        let mut world = World::new(8);
        let p = particle_at(&mut world, 200.0, 200.0, (0.0, 0.0));
        let q = particle_at(&mut world, 200.5, 200.0, (0.0, 0.0));
        attractor_at(&mut world, 200.0, 200.0, 8000.0);
        run(&mut world);

        let on_top = world.component::<Acceleration>(p);
        assert!(on_top.x.is_finite() && on_top.y.is_finite());
        assert_eq!(*on_top, Acceleration::new());

        // Bounded by mass / floor^2 * scale = 8000 / 100 * 500
        let near = world.component::<Acceleration>(q);
        let bound = 8000.0 / 100.0 * 500.0;
        assert!(near.x.is_finite());
        assert!(near.x.hypot(near.y) <= bound * 1.0001);
    }

    #[test]
    fn test_superposition_cancels_on_symmetry_axis() {
        let mut world = World::new(8);
        let p = particle_at(&mut world, 100.0, 100.0, (0.0, 0.0));
        attractor_at(&mut world, 60.0, 130.0, 5000.0);
        attractor_at(&mut world, 140.0, 130.0, 5000.0);
        run(&mut world);

        let acc = world.component::<Acceleration>(p);
        assert!(acc.x.abs() < 1e-3, "x should cancel, got {}", acc.x);
        assert!(acc.y > 0.0);
    }

    #[test]
    fn test_negative_mass_repels() {
        let mut world = World::new(8);
        let p = particle_at(&mut world, 100.0, 100.0, (0.0, 0.0));
        attractor_at(&mut world, 130.0, 140.0, -5000.0);
        run(&mut world);

        let acc = world.component::<Acceleration>(p);
        let dot = acc.x * 30.0 + acc.y * 40.0;
        assert!(dot < 0.0);
    }

    #[test]
    fn test_attractors_are_not_accelerated() {
        let mut world = World::new(8);
        let a = attractor_at(&mut world, 0.0, 0.0, 5000.0);
        attractor_at(&mut world, 10.0, 0.0, 5000.0);
        run(&mut world);
        assert!(world.get_component::<Acceleration>(a).is_none());
    }
}
