//! Ageing and retirement.

use symphony_core::{mask, EntityId, World};

use super::{System, TickContext};

/// Ages every entity with a [`Lifetime`] and despawns the expired ones
/// before returning.
///
/// [`Lifetime`]: symphony_core::Lifetime
#[derive(Default)]
pub struct LifetimeSystem {
    aging: Vec<EntityId>,
    expired: Vec<EntityId>,
    last_expired: usize,
}

impl LifetimeSystem {
    /// Creates the pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities removed by the most recent run.
    #[must_use]
    pub fn last_expired(&self) -> usize {
        self.last_expired
    }
}

impl System for LifetimeSystem {
    fn name(&self) -> &'static str {
        "lifetime"
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World) {
        world.filter_by_mask_into(mask::LIFETIME, &mut self.aging);
        self.expired.clear();

        let lifetimes = world.lifetimes.as_mut_slice();
        for &id in &self.aging {
            let life = &mut lifetimes[id.index() as usize];
            life.age += ctx.dt;
            if life.age >= life.ttl {
                life.expired = true;
                self.expired.push(id);
            }
        }

        for &id in &self.expired {
            world.despawn(id);
        }
        self.last_expired = self.expired.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::Bounds;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use symphony_core::{EntityBuilder, Lifetime, Particle};

    fn tick(world: &mut World, sys: &mut LifetimeSystem, dt: f32) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ctx = TickContext {
            tick: 1,
            dt,
            bounds: Bounds::new(100.0, 100.0),
            rng: &mut rng,
        };
        sys.run(&mut ctx, world);
    }

    #[test]
    fn test_removed_on_the_tick_age_reaches_ttl() {
        let mut world = World::new(4);
        let id = world
            .spawn_with(
                EntityBuilder::new()
                    .with(Lifetime::new().with_ttl(1.0))
                    .with(Particle),
            )
            .unwrap();
        let mut sys = LifetimeSystem::new();

        for _ in 0..3 {
            tick(&mut world, &mut sys, 0.25);
            assert!(world.is_alive(id));
            assert_eq!(sys.last_expired(), 0);
        }
        assert!((world.component::<Lifetime>(id).age - 0.75).abs() < f32::EPSILON);

        tick(&mut world, &mut sys, 0.25);
        assert!(!world.is_alive(id));
        assert_eq!(sys.last_expired(), 1);
        assert!(world.filter_by_mask(mask::PARTICLE).is_empty());
    }

    #[test]
    fn test_non_positive_ttl_expires_immediately() {
        let mut world = World::new(4);
        world.spawn_with(EntityBuilder::new().with(Lifetime::new().with_ttl(0.0)));
        world.spawn_with(EntityBuilder::new().with(Lifetime::new().with_ttl(-2.0)));
        let mut sys = LifetimeSystem::new();
        tick(&mut world, &mut sys, 1.0 / 60.0);
        assert_eq!(world.alive_count(), 0);
        assert_eq!(sys.last_expired(), 2);
    }

    #[test]
    fn test_entities_without_lifetime_are_untouched() {
        let mut world = World::new(4);
        let keeper = world.spawn_with(EntityBuilder::new().with(Particle)).unwrap();
        let mut sys = LifetimeSystem::new();
        for _ in 0..100 {
            tick(&mut world, &mut sys, 1.0);
        }
        assert!(world.is_alive(keeper));
    }
}
