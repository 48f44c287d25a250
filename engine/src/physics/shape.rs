//! Collision shapes
//!
//! A body carries exactly one primitive shape. New primitives are added as
//! enum variants; [`Shape::moment_of_inertia`] and the collision dispatch in
//! [`crate::physics::collision::test_collision`] match exhaustively, so the
//! compiler points at both sites.

use serde::{Deserialize, Serialize};

use super::types::{AABB, Vec3};

/// Primitive shape of a physics body, in body-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box described by its half extents.
    Box { half_size: Vec3 },
    /// Sphere described by its radius.
    Sphere { radius: f32 },
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    pub fn cuboid(half_size: Vec3) -> Self {
        Shape::Box { half_size }
    }

    /// Scalar moment of inertia for the given mass.
    ///
    /// This is a simplified scalar, not an inertia tensor:
    /// - Box: `(1/12) * m * (2*hx² + 2*hy² + 2*hz²)`
    /// - Sphere: `(2/5) * m * r²`
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        match *self {
            Shape::Box { half_size: h } => {
                (1.0 / 12.0) * mass * (2.0 * h.x * h.x + 2.0 * h.y * h.y + 2.0 * h.z * h.z)
            }
            Shape::Sphere { radius } => (2.0 / 5.0) * mass * radius * radius,
        }
    }

    /// World-space bounds of this shape placed at `position` (orientation ignored).
    pub fn aabb_at(&self, position: Vec3) -> AABB {
        match *self {
            Shape::Box { half_size } => AABB::from_center_half_size(position, half_size),
            Shape::Sphere { radius } => AABB::from_center_half_size(position, Vec3::splat(radius)),
        }
    }

    pub fn is_sphere(&self) -> bool {
        matches!(self, Shape::Sphere { .. })
    }
}
