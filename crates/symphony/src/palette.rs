//! # Colour Palettes
//!
//! Every preset draws from a primary and an alternate gradient. Glow
//! colour and intensity ride along for the renderer.

use serde::{Deserialize, Serialize};
use symphony_core::Color;

/// A start -> end RGBA gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    /// Colour at birth.
    pub start: [u8; 4],
    /// Colour at death.
    pub end: [u8; 4],
}

impl Gradient {
    /// Creates a gradient.
    #[must_use]
    pub const fn new(start: [u8; 4], end: [u8; 4]) -> Self {
        Self { start, end }
    }

    /// Opaque `rgb` fading to fully transparent `rgb`.
    #[must_use]
    pub const fn fade(rgb: [u8; 3]) -> Self {
        Self {
            start: [rgb[0], rgb[1], rgb[2], 255],
            end: [rgb[0], rgb[1], rgb[2], 0],
        }
    }

    /// The component a particle starts life with.
    #[must_use]
    pub const fn to_color(self) -> Color {
        let [sr, sg, sb, sa] = self.start;
        let [er, eg, eb, ea] = self.end;
        Color::new().with_gradient(sr, sg, sb, sa, er, eg, eb, ea)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new([255, 150, 50, 255], [255, 50, 50, 0])
    }
}

/// A preset's colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    /// Main gradient.
    pub primary: Gradient,
    /// Accent gradient.
    pub alternate: Gradient,
    /// Glow tint.
    pub glow: [u8; 3],
    /// Glow strength in `[0, 1]`.
    pub glow_intensity: f32,
}

/// Pink core fading to deep purple, with cyan accents.
pub const GALAXY: ColorPalette = ColorPalette {
    primary: Gradient::new([255, 107, 157, 255], [74, 0, 128, 0]),
    alternate: Gradient::new([0, 212, 255, 255], [0, 0, 51, 0]),
    glow: [255, 255, 255],
    glow_intensity: 0.6,
};

/// Gold to orange-red, with crimson accents.
pub const FIREWORK: ColorPalette = ColorPalette {
    primary: Gradient::new([255, 215, 0, 255], [255, 69, 0, 0]),
    alternate: Gradient::new([255, 0, 68, 255], [136, 0, 34, 0]),
    glow: [255, 240, 200],
    glow_intensity: 0.8,
};

/// Mint to dark teal, with amber accents.
pub const SWARM: ColorPalette = ColorPalette {
    primary: Gradient::new([0, 255, 170, 255], [0, 68, 51, 0]),
    alternate: Gradient::new([255, 136, 0, 255], [68, 34, 0, 0]),
    glow: [150, 255, 200],
    glow_intensity: 0.5,
};

/// Sky blue to navy, with white spray.
pub const FOUNTAIN: ColorPalette = ColorPalette {
    primary: Gradient::new([0, 170, 255, 255], [0, 51, 102, 0]),
    alternate: Gradient::new([255, 255, 255, 255], [136, 204, 255, 0]),
    glow: [100, 180, 255],
    glow_intensity: 0.4,
};

/// Magenta to cyan, with yellow-to-red accents.
pub const CHAOS: ColorPalette = ColorPalette {
    primary: Gradient::new([255, 0, 255, 255], [0, 255, 255, 0]),
    alternate: Gradient::new([255, 255, 0, 255], [255, 0, 0, 0]),
    glow: [255, 220, 255],
    glow_intensity: 0.9,
};
