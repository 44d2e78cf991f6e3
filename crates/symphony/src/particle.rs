//! The one place a visual particle gets assembled.

use symphony_core::{
    Acceleration, EntityBuilder, Lifetime, Particle, Position, Size, Velocity,
};

use crate::palette::Gradient;

/// Initial state of a spawned particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    /// Spawn point.
    pub position: (f32, f32),
    /// Initial velocity.
    pub velocity: (f32, f32),
    /// Constant acceleration until the gravity pass overwrites it.
    pub acceleration: (f32, f32),
    /// Colour over life.
    pub gradient: Gradient,
    /// Seconds to live.
    pub ttl: f32,
    /// Radius at birth.
    pub radius: f32,
    /// Radius at death.
    pub end_radius: f32,
}

impl ParticleSeed {
    /// Stages every component of the full-particle mask.
    #[must_use]
    pub fn builder(&self) -> EntityBuilder {
        EntityBuilder::new()
            .with(Position::new().with(self.position.0, self.position.1))
            .with(Velocity::new().with(self.velocity.0, self.velocity.1))
            .with(
                Acceleration::new()
                    .with_x(self.acceleration.0)
                    .with_y(self.acceleration.1),
            )
            .with(self.gradient.to_color())
            .with(Lifetime::new().with_ttl(self.ttl))
            .with(Size::new().with_radius(self.radius).with_end_size(self.end_radius))
            .with(Particle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphony_core::mask;

    #[test]
    fn test_builder_is_full_particle() {
        let seed = ParticleSeed {
            position: (1.0, 2.0),
            velocity: (3.0, 4.0),
            acceleration: (0.0, 100.0),
            gradient: Gradient::default(),
            ttl: 2.0,
            radius: 4.0,
            end_radius: 1.2,
        };
        assert_eq!(seed.builder().mask(), mask::FULL_PARTICLE);
    }
}
