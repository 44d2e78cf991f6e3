//! # Quality Tiers
//!
//! A tier trades particle count and post-effects for frame rate. The
//! emitter reads the particle cap and spawn multiplier; everything else
//! is carried for the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three quality tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    /// Fewest particles, no glow.
    Low,
    /// The default tier.
    #[default]
    Medium,
    /// Most particles, two glow passes and motion blur.
    High,
}

impl QualityLevel {
    /// All tiers, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Maps 0, 1, 2 to Low, Medium, High. Anything else is Medium.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Low,
            2 => Self::High,
            _ => Self::Medium,
        }
    }

    /// Position in [`QualityLevel::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Low -> Medium -> High -> Low.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Parses a tier name, case-insensitively. Unknown names are Medium.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a tier controls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualitySettings {
    /// Particle cap for this tier.
    pub max_particles: usize,
    /// Factor applied to the emitter's spawn rate.
    pub spawn_multiplier: f32,
    /// Whether the renderer draws glow.
    #[serde(default)]
    pub glow_enabled: bool,
    /// Glow blur passes.
    #[serde(default)]
    pub glow_passes: u32,
    /// Whether the renderer blends previous frames.
    #[serde(default)]
    pub motion_blur: bool,
    /// Motion blur samples.
    #[serde(default)]
    pub blur_samples: u32,
    /// Base draw size hint.
    #[serde(default = "default_particle_size")]
    pub particle_size: f32,
    /// Trail segments per particle.
    #[serde(default)]
    pub trail_length: u32,
}

fn default_particle_size() -> f32 {
    2.5
}

impl QualitySettings {
    /// Low tier: 3000 particles at half spawn rate, no effects.
    #[must_use]
    pub const fn low() -> Self {
        Self {
            max_particles: 3_000,
            spawn_multiplier: 0.5,
            glow_enabled: false,
            glow_passes: 0,
            motion_blur: false,
            blur_samples: 0,
            particle_size: 3.0,
            trail_length: 0,
        }
    }

    /// Medium tier: 7000 particles at the preset's rate, one glow pass.
    #[must_use]
    pub const fn medium() -> Self {
        Self {
            max_particles: 7_000,
            spawn_multiplier: 1.0,
            glow_enabled: true,
            glow_passes: 1,
            motion_blur: false,
            blur_samples: 0,
            particle_size: 2.5,
            trail_length: 3,
        }
    }

    /// High tier: 12000 particles at 1.5x rate, two glow passes, motion blur.
    #[must_use]
    pub const fn high() -> Self {
        Self {
            max_particles: 12_000,
            spawn_multiplier: 1.5,
            glow_enabled: true,
            glow_passes: 2,
            motion_blur: true,
            blur_samples: 4,
            particle_size: 2.0,
            trail_length: 5,
        }
    }
}

/// The tier table, injected through configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityTable {
    /// Tier active at start-up.
    pub default: QualityLevel,
    /// Low tier.
    pub low: QualitySettings,
    /// Medium tier.
    pub medium: QualitySettings,
    /// High tier.
    pub high: QualitySettings,
}

impl QualityTable {
    /// Settings for `level`.
    #[must_use]
    pub const fn get(&self, level: QualityLevel) -> QualitySettings {
        match level {
            QualityLevel::Low => self.low,
            QualityLevel::Medium => self.medium,
            QualityLevel::High => self.high,
        }
    }

    /// Largest cap across the tiers.
    #[must_use]
    pub fn max_cap(&self) -> usize {
        self.low
            .max_particles
            .max(self.medium.max_particles)
            .max(self.high.max_particles)
    }
}

impl Default for QualityTable {
    fn default() -> Self {
        Self {
            default: QualityLevel::Medium,
            low: QualitySettings::low(),
            medium: QualitySettings::medium(),
            high: QualitySettings::high(),
        }
    }
}
