//! Single-component masks and the composite masks the systems query by.

use super::component::{
    Acceleration, Attractor, Color, Component, Emitter, Lifetime, Mass, Particle, Position, Size,
    Velocity,
};

/// `Position`.
pub const POSITION: u64 = Position::MASK;
/// `Velocity`.
pub const VELOCITY: u64 = Velocity::MASK;
/// `Acceleration`.
pub const ACCELERATION: u64 = Acceleration::MASK;
/// `Color`.
pub const COLOR: u64 = Color::MASK;
/// `Lifetime`.
pub const LIFETIME: u64 = Lifetime::MASK;
/// `Mass`.
pub const MASS: u64 = Mass::MASK;
/// `Size`.
pub const SIZE: u64 = Size::MASK;
/// `Emitter` tag.
pub const EMITTER: u64 = Emitter::MASK;
/// `Attractor` tag.
pub const ATTRACTOR: u64 = Attractor::MASK;
/// `Particle` tag.
pub const PARTICLE: u64 = Particle::MASK;

/// Anything that moves.
pub const MOVABLE: u64 = POSITION | VELOCITY;
/// Anything integrated with forces.
pub const PHYSICS: u64 = MOVABLE | ACCELERATION;
/// Anything the renderer can draw.
pub const RENDERABLE: u64 = POSITION | COLOR | SIZE;
/// A fully built visual particle.
pub const FULL_PARTICLE: u64 = PHYSICS | COLOR | LIFETIME | SIZE | PARTICLE;

/// What the gravity pass treats as a force source.
pub const ATTRACTOR_QUERY: u64 = POSITION | MASS | ATTRACTOR;
/// What the gravity pass accelerates.
pub const GRAVITY_TARGET: u64 = POSITION | ACCELERATION | PARTICLE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composites() {
        assert_eq!(MOVABLE, 0b11);
        assert_eq!(PHYSICS, 0b111);
        assert_eq!(RENDERABLE, 0b100_1001);
        assert_eq!(FULL_PARTICLE & RENDERABLE, RENDERABLE);
        assert_eq!(FULL_PARTICLE & GRAVITY_TARGET, GRAVITY_TARGET);
        assert_eq!(FULL_PARTICLE & MASS, 0);
        assert_eq!(ATTRACTOR_QUERY, (1 << 0) | (1 << 5) | (1 << 8));
    }
}
