//! # Entity Component System
//!
//! A fixed-capacity ECS for short-lived particles.
//!
//! ## Design Philosophy
//!
//! - All storage is pre-allocated at world creation
//! - Components are stored in dense arrays indexed by entity index
//! - Entity IDs are simple indices with generation counters
//! - Queries are bitmask supersets over a dense live list

mod builder;
mod component;
mod entity;
pub mod mask;
mod storage;
mod world;

pub use builder::EntityBuilder;
pub use component::{
    Acceleration, Attractor, Color, Component, Emitter, Lifetime, Mass, Particle, Position, Size,
    Velocity,
};
pub use entity::{Entity, EntityId};
pub use storage::ComponentStorage;
pub use world::{Stored, World};
