//! Staging area for an entity's components before it enters the world.

use super::component::{
    Acceleration, Attractor, Color, Emitter, Lifetime, Mass, Particle, Position, Size, Velocity,
};
use super::world::Stored;

/// Collects components for a single [`World::spawn_with`] call.
///
/// Staging the same component type twice keeps the last value.
///
/// [`World::spawn_with`]: super::World::spawn_with
#[derive(Clone, Copy, Debug, Default)]
pub struct EntityBuilder {
    pub(crate) position: Option<Position>,
    pub(crate) velocity: Option<Velocity>,
    pub(crate) acceleration: Option<Acceleration>,
    pub(crate) color: Option<Color>,
    pub(crate) lifetime: Option<Lifetime>,
    pub(crate) mass: Option<Mass>,
    pub(crate) size: Option<Size>,
    pub(crate) emitter: Option<Emitter>,
    pub(crate) attractor: Option<Attractor>,
    pub(crate) particle: Option<Particle>,
}

impl EntityBuilder {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a component.
    #[inline]
    #[must_use]
    pub fn with<C: Stored>(mut self, component: C) -> Self {
        *C::slot(&mut self) = Some(component);
        self
    }

    /// Mask the entity will have once spawned.
    #[must_use]
    pub fn mask(&self) -> u64 {
        fn bit<C: Stored>(slot: Option<C>) -> u64 {
            if slot.is_some() {
                C::MASK
            } else {
                0
            }
        }

        bit(self.position)
            | bit(self.velocity)
            | bit(self.acceleration)
            | bit(self.color)
            | bit(self.lifetime)
            | bit(self.mass)
            | bit(self.size)
            | bit(self.emitter)
            | bit(self.attractor)
            | bit(self.particle)
    }
}
