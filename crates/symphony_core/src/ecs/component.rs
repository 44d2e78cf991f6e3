//! # Component System
//!
//! Components are pure data containers with no behavior beyond small
//! constructors and chained `with_*` builders.
//! They must be Copy and have a fixed size for zero-allocation storage.
//!
//! Every component type owns one bit of the 64-bit entity mask:
//!
//! | Bit | Component     |
//! |-----|---------------|
//! | 0   | `Position`    |
//! | 1   | `Velocity`    |
//! | 2   | `Acceleration`|
//! | 3   | `Color`       |
//! | 4   | `Lifetime`    |
//! | 5   | `Mass`        |
//! | 6   | `Size`        |
//! | 7   | `Emitter`     |
//! | 8   | `Attractor`   |
//! | 9   | `Particle`    |

use bytemuck::{Pod, Zeroable};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: No heap allocations, bitwise copyable
/// - `Default`: Must have a default value for pre-allocation
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Default)]
/// struct Heat(f32);
///
/// impl Component for Heat {
///     const ID: u8 = 10;
/// }
/// ```
pub trait Component: Copy + Default + Send + Sync + 'static {
    /// Unique identifier for this component type (0-63).
    ///
    /// This ID is used for the component bitmask in entities.
    const ID: u8;

    /// The mask bit for this component type.
    const MASK: u64 = 1 << Self::ID;
}

// =============================================================================
// Kinematics
// =============================================================================

/// Position in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// X coordinate in world space.
    pub x: f32,
    /// Y coordinate in world space.
    pub y: f32,
}

impl Component for Position {
    const ID: u8 = 0;
}

impl Position {
    /// Creates a position at the origin.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Sets the X coordinate.
    #[inline]
    #[must_use]
    pub const fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Sets the Y coordinate.
    #[inline]
    #[must_use]
    pub const fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Sets both coordinates.
    #[inline]
    #[must_use]
    pub const fn with(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// Velocity in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// X velocity component.
    pub x: f32,
    /// Y velocity component.
    pub y: f32,
}

impl Component for Velocity {
    const ID: u8 = 1;
}

impl Velocity {
    /// Creates a zero velocity.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Sets the X component.
    #[inline]
    #[must_use]
    pub const fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Sets the Y component.
    #[inline]
    #[must_use]
    pub const fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Sets both components.
    #[inline]
    #[must_use]
    pub const fn with(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Returns the speed (Euclidean length).
    #[inline]
    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// Acceleration in world units per second squared.
///
/// Rebuilt from scratch by the gravity pass every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Acceleration {
    /// X acceleration component.
    pub x: f32,
    /// Y acceleration component.
    pub y: f32,
}

impl Component for Acceleration {
    const ID: u8 = 2;
}

impl Acceleration {
    /// Creates a zero acceleration.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Sets the X component.
    #[inline]
    #[must_use]
    pub const fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Sets the Y component.
    #[inline]
    #[must_use]
    pub const fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Zeroes both components.
    #[inline]
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    /// Accumulates a contribution.
    #[inline]
    pub fn add(&mut self, x: f32, y: f32) {
        self.x += x;
        self.y += y;
    }
}

/// Gravitational mass. Negative repels, zero is inert.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Mass {
    /// The mass value.
    pub value: f32,
}

impl Component for Mass {
    const ID: u8 = 5;
}

impl Mass {
    /// Creates a unit mass.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 1.0 }
    }

    /// Sets the mass value.
    #[inline]
    #[must_use]
    pub const fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }
}

impl Default for Mass {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Appearance
// =============================================================================

/// RGBA colour with a start/end gradient.
///
/// The current channels are derived from the gradient by lifetime progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    /// Current red.
    pub r: u8,
    /// Current green.
    pub g: u8,
    /// Current blue.
    pub b: u8,
    /// Current alpha.
    pub a: u8,
    /// Gradient start red.
    pub start_r: u8,
    /// Gradient start green.
    pub start_g: u8,
    /// Gradient start blue.
    pub start_b: u8,
    /// Gradient start alpha.
    pub start_a: u8,
    /// Gradient end red.
    pub end_r: u8,
    /// Gradient end green.
    pub end_g: u8,
    /// Gradient end blue.
    pub end_b: u8,
    /// Gradient end alpha.
    pub end_a: u8,
}

impl Component for Color {
    const ID: u8 = 3;
}

impl Color {
    /// Opaque white fading to transparent white.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
            start_r: 255,
            start_g: 255,
            start_b: 255,
            start_a: 255,
            end_r: 255,
            end_g: 255,
            end_b: 255,
            end_a: 0,
        }
    }

    /// Sets the current colour and the gradient start to the same value.
    #[inline]
    #[must_use]
    pub const fn with_rgba(mut self, r: u8, g: u8, b: u8, a: u8) -> Self {
        self.r = r;
        self.g = g;
        self.b = b;
        self.a = a;
        self.start_r = r;
        self.start_g = g;
        self.start_b = b;
        self.start_a = a;
        self
    }

    /// Sets the full gradient. The current colour starts at the gradient start.
    #[inline]
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_gradient(
        mut self,
        start_r: u8,
        start_g: u8,
        start_b: u8,
        start_a: u8,
        end_r: u8,
        end_g: u8,
        end_b: u8,
        end_a: u8,
    ) -> Self {
        self.start_r = start_r;
        self.start_g = start_g;
        self.start_b = start_b;
        self.start_a = start_a;
        self.end_r = end_r;
        self.end_g = end_g;
        self.end_b = end_b;
        self.end_a = end_a;
        self.r = start_r;
        self.g = start_g;
        self.b = start_b;
        self.a = start_a;
        self
    }

    /// Current channels as an array.
    #[inline]
    #[must_use]
    pub const fn current(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Gradient start channels as an array.
    #[inline]
    #[must_use]
    pub const fn start(self) -> [u8; 4] {
        [self.start_r, self.start_g, self.start_b, self.start_a]
    }

    /// Gradient end channels as an array.
    #[inline]
    #[must_use]
    pub const fn end(self) -> [u8; 4] {
        [self.end_r, self.end_g, self.end_b, self.end_a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new()
    }
}

/// Radius with a start/end gradient.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    /// Current radius.
    pub radius: f32,
    /// Radius at birth.
    pub start_size: f32,
    /// Radius at death.
    pub end_size: f32,
}

impl Component for Size {
    const ID: u8 = 6;
}

impl Size {
    /// Radius 3 shrinking to 1.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            radius: 3.0,
            start_size: 3.0,
            end_size: 1.0,
        }
    }

    /// Sets the current radius and the gradient start.
    #[inline]
    #[must_use]
    pub const fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self.start_size = radius;
        self
    }

    /// Sets the gradient end.
    #[inline]
    #[must_use]
    pub const fn with_end_size(mut self, end_size: f32) -> Self {
        self.end_size = end_size;
        self
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Lifetime
// =============================================================================

/// Age and time-to-live, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lifetime {
    /// Seconds lived so far.
    pub age: f32,
    /// Seconds to live.
    pub ttl: f32,
    /// Set once `age >= ttl`.
    pub expired: bool,
}

impl Component for Lifetime {
    const ID: u8 = 4;
}

impl Lifetime {
    /// Fresh lifetime of five seconds.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            age: 0.0,
            ttl: 5.0,
            expired: false,
        }
    }

    /// Sets the time-to-live.
    #[inline]
    #[must_use]
    pub const fn with_ttl(mut self, ttl: f32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Normalized age in `[0, 1]`.
    ///
    /// A non-positive `ttl` counts as fully expired.
    #[inline]
    #[must_use]
    pub fn progress(self) -> f32 {
        if self.ttl <= 0.0 {
            return 1.0;
        }
        (self.age / self.ttl).clamp(0.0, 1.0)
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tags
// =============================================================================

/// Tag: a short-lived visual particle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Particle;

impl Component for Particle {
    const ID: u8 = 9;
}

/// Tag: a spawn source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Emitter;

impl Component for Emitter {
    const ID: u8 = 7;
}

/// Tag: a point exerting force on particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Attractor;

impl Component for Attractor {
    const ID: u8 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bits_are_unique() {
        let masks = [
            Position::MASK,
            Velocity::MASK,
            Acceleration::MASK,
            Color::MASK,
            Lifetime::MASK,
            Mass::MASK,
            Size::MASK,
            Emitter::MASK,
            Attractor::MASK,
            Particle::MASK,
        ];
        let combined = masks.iter().fold(0u64, |acc, m| {
            assert_eq!(acc & m, 0, "mask bit reused");
            acc | m
        });
        assert_eq!(combined, 0b11_1111_1111);
    }

    #[test]
    fn test_color_defaults_fill_current_and_start() {
        let c = Color::new();
        assert_eq!(c.current(), [255, 255, 255, 255]);
        assert_eq!(c.start(), [255, 255, 255, 255]);
        assert_eq!(c.end(), [255, 255, 255, 0]);

        let c = Color::new().with_rgba(10, 20, 30, 40);
        assert_eq!(c.current(), [10, 20, 30, 40]);
        assert_eq!(c.start(), [10, 20, 30, 40]);
        assert_eq!(c.end(), [255, 255, 255, 0]);
    }

    #[test]
    fn test_color_gradient_sets_current_to_start() {
        let c = Color::new().with_gradient(255, 0, 0, 255, 0, 0, 255, 0);
        assert_eq!(c.current(), [255, 0, 0, 255]);
        assert_eq!(c.start(), [255, 0, 0, 255]);
        assert_eq!(c.end(), [0, 0, 255, 0]);
    }

    #[test]
    fn test_size_builders() {
        let s = Size::new();
        assert!((s.radius - 3.0).abs() < f32::EPSILON);
        assert!((s.end_size - 1.0).abs() < f32::EPSILON);

        let s = Size::new().with_radius(5.0).with_end_size(1.5);
        assert!((s.radius - 5.0).abs() < f32::EPSILON);
        assert!((s.start_size - 5.0).abs() < f32::EPSILON);
        assert!((s.end_size - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_lifetime_progress() {
        let mut l = Lifetime::new().with_ttl(2.0);
        assert!(l.progress().abs() < f32::EPSILON);
        l.age = 1.0;
        assert!((l.progress() - 0.5).abs() < f32::EPSILON);
        l.age = 5.0;
        assert!((l.progress() - 1.0).abs() < f32::EPSILON);

        let l = Lifetime::new().with_ttl(0.0);
        assert!((l.progress() - 1.0).abs() < f32::EPSILON);
        let l = Lifetime::new().with_ttl(-1.0);
        assert!((l.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_acceleration_accumulates_and_resets() {
        let mut a = Acceleration::new().with_x(1.0).with_y(2.0);
        a.add(0.5, -1.0);
        assert_eq!(a, Acceleration { x: 1.5, y: 1.0 });
        a.reset();
        assert_eq!(a, Acceleration::new());
    }

    #[test]
    fn test_velocity_magnitude_and_mass_default() {
        assert!((Velocity::new().with(3.0, 4.0).magnitude() - 5.0).abs() < 1e-6);
        assert!((Mass::default().value - 1.0).abs() < f32::EPSILON);
        assert!((Mass::new().with_value(-8000.0).value + 8000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_component_sizes() {
        assert_eq!(std::mem::size_of::<Position>(), 8);
        assert_eq!(std::mem::size_of::<Color>(), 12);
        assert_eq!(std::mem::size_of::<Size>(), 12);
        assert_eq!(std::mem::size_of::<Particle>(), 0);
    }
}
