//! Gradient interpolation for colour and radius.

use symphony_core::{mask, Color, EntityId, Lifetime, Size, World};

use super::{System, TickContext};

/// `a + (b - a) * t`, truncated toward zero into a byte.
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let a = f32::from(a);
    let b = f32::from(b);
    (a + (b - a) * t) as u8
}

/// `a + (b - a) * t`, unrounded.
#[inline]
#[must_use]
pub fn lerp_size(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn apply_color(color: &mut Color, life: Lifetime) {
    let t = life.progress();
    color.r = lerp_channel(color.start_r, color.end_r, t);
    color.g = lerp_channel(color.start_g, color.end_g, t);
    color.b = lerp_channel(color.start_b, color.end_b, t);
    color.a = lerp_channel(color.start_a, color.end_a, t);
}

/// Recomputes current colour and radius from lifetime progress.
#[derive(Default)]
pub struct ColorSystem {
    scratch: Vec<EntityId>,
}

impl ColorSystem {
    /// Creates the pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for ColorSystem {
    fn name(&self) -> &'static str {
        "color"
    }

    fn run(&mut self, _ctx: &mut TickContext<'_>, world: &mut World) {
        world.filter_by_mask_into(mask::COLOR | mask::LIFETIME, &mut self.scratch);
        let lifetimes = world.lifetimes.as_slice();
        let colors = world.colors.as_mut_slice();
        for id in &self.scratch {
            let idx = id.index() as usize;
            apply_color(&mut colors[idx], lifetimes[idx]);
        }

        world.filter_by_mask_into(mask::SIZE | mask::LIFETIME, &mut self.scratch);
        let sizes = world.sizes.as_mut_slice();
        for id in &self.scratch {
            let idx = id.index() as usize;
            let size: &mut Size = &mut sizes[idx];
            size.radius = lerp_size(size.start_size, size.end_size, lifetimes[idx].progress());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::Bounds;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use symphony_core::EntityBuilder;

    fn tick(world: &mut World) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ctx = TickContext {
            tick: 1,
            dt: 0.0,
            bounds: Bounds::new(100.0, 100.0),
            rng: &mut rng,
        };
        ColorSystem::new().run(&mut ctx, world);
    }

    #[test]
    fn test_lerp_channel() {
        assert_eq!(lerp_channel(0, 100, 0.5), 50);
        assert_eq!(lerp_channel(200, 200, 0.37), 200);
        assert_eq!(lerp_channel(17, 240, 0.0), 17);
        assert_eq!(lerp_channel(17, 240, 1.0), 240);
        assert_eq!(lerp_channel(240, 17, 1.0), 17);
        assert_eq!(lerp_channel(255, 0, 0.5), 127);
    }

    #[test]
    fn test_lerp_size() {
        assert!((lerp_size(4.0, 1.0, 0.5) - 2.5).abs() < f32::EPSILON);
        assert!((lerp_size(4.0, 1.0, 1.0) - 1.0).abs() < f32::EPSILON);
    }

    fn gradient_entity(world: &mut World, age: f32, ttl: f32) -> EntityId {
        let mut life = Lifetime::new().with_ttl(ttl);
        life.age = age;
        world
            .spawn_with(
                EntityBuilder::new()
                    .with(Color::new().with_gradient(255, 0, 0, 255, 0, 0, 255, 0))
                    .with(Size::new().with_radius(4.0).with_end_size(1.0))
                    .with(life),
            )
            .unwrap()
    }

    #[test]
    fn test_midpoint() {
        let mut world = World::new(4);
        let id = gradient_entity(&mut world, 1.0, 2.0);
        tick(&mut world);

        assert_eq!(world.component::<Color>(id).current(), [127, 0, 127, 127]);
        assert!((world.component::<Size>(id).radius - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_expired_but_present_reaches_end_values() {
        let mut world = World::new(4);
        let id = gradient_entity(&mut world, 2.0, 2.0);
        let over = gradient_entity(&mut world, 9.0, 2.0);
        let zero_ttl = gradient_entity(&mut world, 0.0, 0.0);
        tick(&mut world);

        for e in [id, over, zero_ttl] {
            assert_eq!(world.component::<Color>(e).current(), [0, 0, 255, 0]);
            assert!((world.component::<Size>(e).radius - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_color_without_lifetime_is_left_alone() {
        let mut world = World::new(4);
        let id = world
            .spawn_with(EntityBuilder::new().with(Color::new().with_rgba(1, 2, 3, 4)))
            .unwrap();
        tick(&mut world);
        assert_eq!(world.component::<Color>(id).current(), [1, 2, 3, 4]);
    }
}
