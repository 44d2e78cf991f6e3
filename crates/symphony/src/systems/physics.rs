//! Semi-implicit Euler integration with damping, a speed clamp and
//! toroidal wrap.

use symphony_core::{mask, Acceleration, EntityId, World};

use super::{Bounds, System, TickContext};

/// Integrates everything with a position and a velocity.
pub struct PhysicsSystem {
    damping: f32,
    max_velocity: f32,
    movers: Vec<EntityId>,
}

impl PhysicsSystem {
    /// Creates the pass.
    #[must_use]
    pub fn new(damping: f32, max_velocity: f32) -> Self {
        Self {
            damping,
            max_velocity,
            movers: Vec::new(),
        }
    }

    /// Wraps one coordinate. `v < 0` jumps to `extent`, `v > extent` to 0;
    /// `v == extent` stays put.
    #[inline]
    #[must_use]
    pub fn wrap(v: f32, extent: f32) -> f32 {
        if v < 0.0 {
            extent
        } else if v > extent {
            0.0
        } else {
            v
        }
    }

    fn step(&self, world: &mut World, id: EntityId, dt: f32, bounds: Bounds) {
        let idx = id.index() as usize;
        let accelerated = world.has::<Acceleration>(id);

        let vel = &mut world.velocities.as_mut_slice()[idx];
        if accelerated {
            let acc = world.accelerations.as_slice()[idx];
            vel.x += acc.x * dt;
            vel.y += acc.y * dt;
        }

        vel.x *= self.damping;
        vel.y *= self.damping;

        let speed = vel.magnitude();
        if speed > self.max_velocity {
            let scale = self.max_velocity / speed;
            vel.x *= scale;
            vel.y *= scale;
        }
        let vel = *vel;

        let pos = &mut world.positions.as_mut_slice()[idx];
        pos.x = Self::wrap(pos.x + vel.x * dt, bounds.width);
        pos.y = Self::wrap(pos.y + vel.y * dt, bounds.height);
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World) {
        let mut movers = std::mem::take(&mut self.movers);
        world.filter_by_mask_into(mask::MOVABLE, &mut movers);
        for &id in &movers {
            self.step(world, id, ctx.dt, ctx.bounds);
        }
        self.movers = movers;
    }
}
