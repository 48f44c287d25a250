//! Physics math types
//!
//! Vectors and quaternions are re-exported from glam; this module adds the
//! few helpers the solver needs on top of them: an axis-aligned box, the
//! epsilon constants used by the degenerate-geometry branches, and an RGBA
//! color with clamped linear interpolation for body tinting.

use serde::{Deserialize, Serialize};

pub use glam::{Quat, Vec3};

/// Squared-distance threshold below which two points are treated as coincident.
pub const SMALL_NUMBER: f32 = 1e-12;

/// Near-zero threshold for speeds and rotation axes.
pub const KINDA_SMALL_NUMBER: f32 = 1e-6;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given half extents centered on `center`.
    pub fn from_center_half_size(center: Vec3, half_size: Vec3) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extents (max - min).
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Closest point inside (or on) the box to `point`.
    ///
    /// Each component is clamped into `[min, max]`, so a point already inside
    /// the box is returned unchanged.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// True when `min <= max` on every axis. Zero-thickness boxes are valid.
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }
}

/// 8-bit RGBA color handed to the renderer alongside each body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const GREEN: Color = Color::rgba(0, 228, 48, 255);
    pub const RED: Color = Color::rgba(230, 41, 55, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation from `from` to `to`, with `t` clamped to `[0, 1]`.
    ///
    /// Channels are truncated toward zero after blending. A NaN `t` is
    /// treated as 0.
    pub fn lerp(from: Color, to: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| -> u8 {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t) as u8
        };
        Color {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: channel(from.a, to.a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
