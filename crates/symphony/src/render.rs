//! # Render Read-Out
//!
//! GPU-ready per-particle instances plus the counters a debug overlay
//! shows. Nothing here draws; the host uploads the slice as-is.

use bytemuck::{Pod, Zeroable};
use symphony_core::{mask, World};

use crate::presets::PresetId;
use crate::quality::QualityLevel;

/// One circle to draw. 16 bytes, matches a `vec2 + f32 + u32` vertex layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Centre in world units.
    pub position: [f32; 2],
    /// Current radius.
    pub radius: f32,
    /// RGBA packed as `0xRRGGBBAA`.
    pub color: u32,
}

impl ParticleInstance {
    /// Packs four channels as `0xRRGGBBAA`.
    #[inline]
    #[must_use]
    pub const fn pack_rgba(rgba: [u8; 4]) -> u32 {
        u32::from_be_bytes(rgba)
    }

    /// Splits the packed colour back into channels.
    #[inline]
    #[must_use]
    pub const fn rgba(self) -> [u8; 4] {
        self.color.to_be_bytes()
    }
}

/// Refills `out` with every entity carrying Position, Color and Size.
///
/// The buffer is cleared first and keeps its allocation between frames.
pub fn write_instances(world: &World, out: &mut Vec<ParticleInstance>) {
    out.clear();
    let positions = world.positions.as_slice();
    let colors = world.colors.as_slice();
    let sizes = world.sizes.as_slice();

    out.extend(
        world
            .iter_alive()
            .filter(|e| e.matches(mask::RENDERABLE))
            .map(|e| {
                let idx = e.id.index() as usize;
                let pos = positions[idx];
                ParticleInstance {
                    position: [pos.x, pos.y],
                    radius: sizes[idx].radius,
                    color: ParticleInstance::pack_rgba(colors[idx].current()),
                }
            }),
    );
}

/// Per-tick counters for overlays and logs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Ticks advanced so far.
    pub tick: u64,
    /// Live Particle-tagged entities.
    pub particles: usize,
    /// Effective capacity ceiling.
    pub capacity: usize,
    /// Spawned by the emitter this tick.
    pub spawned: usize,
    /// Removed by the lifetime pass this tick.
    pub expired: usize,
    /// Interaction-point mass, 0 when inactive.
    pub attractor_mass: f32,
    /// Active tier.
    pub quality: QualityLevel,
    /// Active preset.
    pub preset: PresetId,
}
