//! # Systems
//!
//! One pass each, run in this order every tick:
//!
//! ```text
//! input -> emitter -> gravity -> physics -> lifetime -> color/size
//! ```
//!
//! Gravity must see accelerations it reset itself, and lifetime removals
//! must land before the interpolation pass reads the particle set. Each
//! system finishes all of its writes before the next one starts.

mod color;
mod emitter;
mod gravity;
mod input;
mod lifetime;
mod physics;

use rand_chacha::ChaCha8Rng;
use symphony_core::World;

pub use color::{lerp_channel, lerp_size, ColorSystem};
pub use emitter::{EmitterConfig, EmitterSystem, SpawnPattern};
pub use gravity::GravitySystem;
pub use input::{
    InputRequests, InputSystem, LockMode, PointerInput, DOUBLE_PRESS_WINDOW, HOLD_MASS,
    LOCKED_MASS,
};
pub use lifetime::LifetimeSystem;
pub use physics::PhysicsSystem;

/// World rectangle `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Bounds {
    /// Creates bounds.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre point.
    #[must_use]
    pub fn center(self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Per-tick inputs shared by every system.
pub struct TickContext<'a> {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Fixed step in seconds, supplied by the host.
    pub dt: f32,
    /// World rectangle.
    pub bounds: Bounds,
    /// Emitter random stream.
    pub rng: &'a mut ChaCha8Rng,
}

/// A per-tick transform over the world.
pub trait System {
    /// Name used in trace output.
    fn name(&self) -> &'static str;

    /// Runs the pass to completion.
    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World);
}
