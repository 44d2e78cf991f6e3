//! # Simulation Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an
//! empty or partial file is valid.
//!
//! ```toml
//! seed = 42
//!
//! [window]
//! width = 1920
//! height = 1080
//!
//! [physics]
//! damping = 0.98
//!
//! [quality]
//! default = "high"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::quality::QualityTable;

/// Window dimensions double as the simulation's world bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// World width in pixels.
    pub width: u32,
    /// World height in pixels.
    pub height: u32,
    /// Host window title.
    pub title: String,
    /// Host tick rate; the fixed step is `1 / fps`.
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Particle Symphony - ECS Showcase".to_owned(),
            fps: 60,
        }
    }
}

/// Particle population and emitter defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Configured particle ceiling (further capped by the quality tier).
    pub max_count: usize,
    /// Typical spawn radius; the default emitter draws from 2/3..5/3 of it.
    pub default_size: f32,
    /// Default emitter rate, particles per second.
    pub spawn_rate: f32,
    /// Longest default lifetime; the default emitter draws from 60..100% of it.
    pub default_ttl: f32,
    /// Entity slots allocated up front. Must cover every tier's cap plus the attractor.
    pub world_capacity: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_count: 10_000,
            default_size: 3.0,
            spawn_rate: 100.0,
            default_ttl: 5.0,
            world_capacity: 16_384,
        }
    }
}

/// Integration and force-law constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Global downward pull. Kept for config compatibility; the presets
    /// express gravity as per-particle acceleration instead.
    pub gravity: f32,
    /// Velocity multiplier applied every tick.
    pub damping: f32,
    /// Speed clamp, world units per second.
    pub max_velocity: f32,
    /// Scale applied to `mass / dist^2`.
    pub force_scale: f32,
    /// Distance floor for the force law.
    pub min_distance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            damping: 0.99,
            max_velocity: 500.0,
            force_scale: 500.0,
            min_distance: 10.0,
        }
    }
}

/// Root configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every random draw the simulation makes.
    pub seed: u64,
    /// Window / world bounds.
    pub window: WindowConfig,
    /// Particle defaults.
    pub particles: ParticleConfig,
    /// Physics constants.
    pub physics: PhysicsConfig,
    /// Quality tier table.
    pub quality: QualityTable,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_CAFE,
            window: WindowConfig::default(),
            particles: ParticleConfig::default(),
            physics: PhysicsConfig::default(),
            quality: QualityTable::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML, [`ConfigError::Invalid`]
    /// for out-of-range values.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`SimulationConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Like [`SimulationConfig::load`], but falls back to defaults on any error.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|err| {
            warn!(path = %path.as_ref().display(), error = %err, "using default configuration");
            Self::default()
        })
    }

    /// Serializes back to TOML.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_owned()));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window width and height must be positive");
        }
        if self.window.fps == 0 {
            return invalid("window.fps must be positive");
        }
        if self.physics.damping.is_nan() || self.physics.damping <= 0.0 || self.physics.damping > 1.0 {
            return invalid("physics.damping must be in (0, 1]");
        }
        if !positive(self.physics.max_velocity) {
            return invalid("physics.max_velocity must be positive");
        }
        if !positive(self.physics.min_distance) {
            return invalid("physics.min_distance must be positive");
        }
        if self.particles.world_capacity == 0
            || u32::try_from(self.particles.world_capacity).is_err()
        {
            return invalid("particles.world_capacity must be in 1..=u32::MAX");
        }
        if !non_negative(self.particles.spawn_rate) {
            return invalid("particles.spawn_rate must not be negative");
        }
        let tiers = [self.quality.low, self.quality.medium, self.quality.high];
        if tiers.iter().any(|t| !non_negative(t.spawn_multiplier)) {
            return invalid("quality spawn_multiplier must not be negative");
        }
        let ceiling = tiers
            .iter()
            .map(|t| t.max_particles.min(self.particles.max_count))
            .max()
            .unwrap_or(0);
        if self.particles.world_capacity <= ceiling {
            return Err(ConfigError::Invalid(format!(
                "particles.world_capacity ({}) must exceed the particle ceiling ({ceiling}) \
                 to leave a slot for the attractor",
                self.particles.world_capacity
            )));
        }
        Ok(())
    }

    /// The fixed time step implied by `window.fps`.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.window.fps.max(1) as f32
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityLevel;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.title, "Particle Symphony - ECS Showcase");
        assert_eq!(config.window.fps, 60);
        assert_eq!(config.particles.max_count, 10_000);
        assert!((config.physics.damping - 0.99).abs() < f32::EPSILON);
        assert!((config.physics.max_velocity - 500.0).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_and_partial_files() {
        assert_eq!(
            SimulationConfig::from_toml_str("").unwrap(),
            SimulationConfig::default()
        );

        let config = SimulationConfig::from_toml_str(
            r#"
            seed = 7

            [window]
            width = 800

            [quality]
            default = "low"

            [quality.high]
            max_particles = 20000
            spawn_multiplier = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.quality.default, QualityLevel::Low);
        assert_eq!(config.quality.high.max_particles, 20_000);
        assert!(!config.quality.high.glow_enabled);
        assert_eq!(config.quality.medium.max_particles, 7_000);
    }

    #[test]
    fn test_parse_error() {
        let err = SimulationConfig::from_toml_str("window = {{{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let err = SimulationConfig::from_toml_str("[physics]\ndamping = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SimulationConfig::from_toml_str("[window]\nwidth = 0").unwrap_err();
        assert!(err.to_string().contains("width"));

        let err =
            SimulationConfig::from_toml_str("[particles]\nworld_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_world_capacity_must_cover_the_ceiling() {
        let err =
            SimulationConfig::from_toml_str("[particles]\nworld_capacity = 600").unwrap_err();
        assert!(err.to_string().contains("world_capacity"));

        // Ceiling is min(max_count, tier cap) = 10000; the attractor needs one more.
        let err =
            SimulationConfig::from_toml_str("[particles]\nworld_capacity = 10000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(SimulationConfig::from_toml_str("[particles]\nworld_capacity = 10001").is_ok());

        let config = SimulationConfig::from_toml_str(
            "[particles]\nmax_count = 500\nworld_capacity = 501",
        )
        .unwrap();
        assert_eq!(config.particles.world_capacity, 501);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("symphony_definitely_missing.toml");
        assert!(matches!(
            SimulationConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(
            SimulationConfig::load_or_default(&path),
            SimulationConfig::default()
        );
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = SimulationConfig::default().to_toml_string().unwrap();
        assert_eq!(
            SimulationConfig::from_toml_str(&text).unwrap(),
            SimulationConfig::default()
        );
    }

    #[test]
    fn test_fixed_dt() {
        let config = SimulationConfig::default();
        assert!((config.fixed_dt() - 1.0 / 60.0).abs() < f32::EPSILON);
    }
}
