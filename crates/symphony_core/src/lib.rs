//! # Symphony Core
//!
//! Fixed-capacity Entity Component System behind Particle Symphony:
//! - Tens of thousands of particles spawned and retired every second
//! - No allocation on spawn, despawn or query once the world exists
//! - Bitmask queries over live entities only
//!
//! ## Architecture Rules
//!
//! 1. **Pre-allocated** - capacity is fixed when the world is created
//! 2. **Dense storage** - one contiguous array per component type
//! 3. **Superset queries** - an entity matches a mask if it has at least those bits
//!
//! ## Example
//!
//! ```rust,ignore
//! use symphony_core::{mask, EntityBuilder, Particle, Position, World};
//!
//! let mut world = World::new(16_384);
//! world.spawn_with(EntityBuilder::new().with(Position::new()).with(Particle));
//! assert_eq!(world.count_matching(mask::PARTICLE), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_possible_truncation)]

pub mod ecs;

pub use ecs::{
    mask, Acceleration, Attractor, Color, Component, ComponentStorage, Emitter, Entity,
    EntityBuilder, EntityId, Lifetime, Mass, Particle, Position, Size, Stored, Velocity, World,
};
