//! Pointer, touch and keyboard interpretation.
//!
//! The host captures raw input and hands one [`PointerInput`] per tick;
//! this pass turns it into the attractor's position and mass and into
//! preset / quality requests.
//!
//! | State                     | Mass    |
//! |---------------------------|---------|
//! | locked attract            | +8000   |
//! | locked repel              | -8000   |
//! | two or more touches       | -5000   |
//! | one touch / left held     | +5000   |
//! | right held                | -5000   |
//! | otherwise                 | 0       |

use symphony_core::{Attractor, EntityBuilder, EntityId, Mass, Position, World};
use tracing::debug;

use super::{System, TickContext};
use crate::presets::PresetId;

/// Mass while a lock is engaged.
pub const LOCKED_MASS: f32 = 8_000.0;
/// Mass while a button or finger is held.
pub const HOLD_MASS: f32 = 5_000.0;
/// Two presses closer than this (seconds) form a double press.
pub const DOUBLE_PRESS_WINDOW: f64 = 0.3;

/// Raw input for one tick, captured by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// Pointer (or first touch) x.
    pub x: f32,
    /// Pointer (or first touch) y.
    pub y: f32,
    /// Left button held.
    pub left_down: bool,
    /// Right button held.
    pub right_down: bool,
    /// Left button went down this tick.
    pub left_pressed: bool,
    /// Right button went down this tick.
    pub right_pressed: bool,
    /// Active touch points.
    pub touches: u32,
    /// A touch began this tick.
    pub touch_started: bool,
    /// Host clock in seconds, used only for double-press detection.
    pub time: f64,
    /// Number key 1-5 pressed this tick, as a zero-based preset index.
    pub preset_key: Option<usize>,
    /// Quality cycle key pressed this tick.
    pub cycle_quality: bool,
}

/// Sticky attractor mode toggled by double presses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LockMode {
    /// Mass follows buttons and touches.
    #[default]
    Free,
    /// Attracts until toggled off.
    Attract,
    /// Repels until toggled off.
    Repel,
}

impl LockMode {
    fn toggled(self, target: Self) -> Self {
        if self == target {
            Self::Free
        } else {
            target
        }
    }
}

/// Requests raised by keys; the simulation applies them after the pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputRequests {
    /// Switch to this preset.
    pub preset: Option<PresetId>,
    /// Advance to the next quality tier.
    pub cycle_quality: bool,
}

/// Owns the single interaction-point entity.
#[derive(Default)]
pub struct InputSystem {
    pending: Option<PointerInput>,
    attractor: Option<EntityId>,
    lock: LockMode,
    last_click: Option<f64>,
    last_touch: Option<f64>,
    requests: InputRequests,
}

impl InputSystem {
    /// Creates the pass with no attractor yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues input for the next run. A later call replaces an unconsumed one.
    pub fn submit(&mut self, input: PointerInput) {
        self.pending = Some(input);
    }

    /// Current lock.
    #[must_use]
    pub fn lock_mode(&self) -> LockMode {
        self.lock
    }

    /// The interaction-point entity, once created.
    #[must_use]
    pub fn attractor(&self) -> Option<EntityId> {
        self.attractor
    }

    /// Takes the requests raised by the last run.
    pub fn take_requests(&mut self) -> InputRequests {
        std::mem::take(&mut self.requests)
    }

    /// Creates or moves the attractor and sets its mass in place.
    ///
    /// # Returns
    ///
    /// `false` only when the world is full and the attractor does not exist yet.
    pub fn set_attractor(&mut self, world: &mut World, x: f32, y: f32, mass: f32) -> bool {
        if let Some(id) = self.attractor.filter(|&id| world.is_alive(id)) {
            let pos = world.component_mut::<Position>(id);
            pos.x = x;
            pos.y = y;
            world.component_mut::<Mass>(id).value = mass;
            return true;
        }

        self.attractor = world.spawn_with(
            EntityBuilder::new()
                .with(Position::new().with(x, y))
                .with(Mass::new().with_value(mass))
                .with(Attractor),
        );
        self.attractor.is_some()
    }

    /// Current attractor mass, 0 if there is none.
    #[must_use]
    pub fn attractor_mass(&self, world: &World) -> f32 {
        self.attractor
            .and_then(|id| world.get_component::<Mass>(id))
            .map_or(0.0, |m| m.value)
    }

    fn double_press(last: &mut Option<f64>, now: f64) -> bool {
        let double = last.is_some_and(|t| now - t < DOUBLE_PRESS_WINDOW);
        *last = Some(now);
        double
    }

    fn update_lock(&mut self, input: &PointerInput) {
        let before = self.lock;

        if input.touch_started {
            let multi = input.touches >= 2;
            if Self::double_press(&mut self.last_touch, input.time) && !multi {
                self.lock = self.lock.toggled(LockMode::Attract);
            }
        }
        if input.left_pressed && Self::double_press(&mut self.last_click, input.time) {
            self.lock = self.lock.toggled(LockMode::Attract);
        }
        if input.right_pressed && Self::double_press(&mut self.last_click, input.time) {
            self.lock = self.lock.toggled(LockMode::Repel);
        }

        if self.lock != before {
            debug!(from = ?before, to = ?self.lock, "attractor lock changed");
        }
    }

    /// Mass implied by the lock and the held inputs.
    #[must_use]
    pub fn resolve_mass(&self, input: &PointerInput) -> f32 {
        match self.lock {
            LockMode::Attract => LOCKED_MASS,
            LockMode::Repel => -LOCKED_MASS,
            LockMode::Free if input.touches >= 2 => -HOLD_MASS,
            LockMode::Free if input.touches == 1 || input.left_down => HOLD_MASS,
            LockMode::Free if input.right_down => -HOLD_MASS,
            LockMode::Free => 0.0,
        }
    }
}

impl System for InputSystem {
    fn name(&self) -> &'static str {
        "input"
    }

    fn run(&mut self, _ctx: &mut TickContext<'_>, world: &mut World) {
        let Some(input) = self.pending.take() else {
            return;
        };

        self.update_lock(&input);
        let mass = self.resolve_mass(&input);
        self.set_attractor(world, input.x, input.y, mass);

        self.requests = InputRequests {
            preset: input.preset_key.map(PresetId::from_index),
            cycle_quality: input.cycle_quality,
        };
    }
}
