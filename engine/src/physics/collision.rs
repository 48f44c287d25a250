//! Collision detection module
//!
//! Pairwise narrow-phase tests between sphere and box bodies. Every test
//! returns a [`HitResult`] whose normal points from the *second* argument
//! toward the *first*, i.e. the direction the first body must move to
//! separate. The resolver relies on this convention for both correction and
//! impulse signs.
//!
//! Exact touching (surface distance of zero) counts as a hit with zero
//! penetration. Box-box pairs are not supported and always miss.
//!
//! # Example
//!
//! ```ignore
//! use ball_pit_engine::physics::collision::{test_sphere_box, test_sphere_sphere};
//! use ball_pit_engine::physics::types::AABB;
//! use glam::Vec3;
//!
//! let floor = AABB::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(0.0, 0.1, 0.0));
//! let hit = test_sphere_box(Vec3::new(0.0, 1.0, 0.0), 1.0, &floor);
//! assert!(hit.is_hit);
//! println!("push out along {:?} by {}", hit.normal, hit.penetration);
//!
//! let hit = test_sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0), 1.0);
//! assert!((hit.penetration - 0.5).abs() < 1e-5);
//! ```

use super::body::PhysicsBody;
use super::shape::Shape;
use super::types::{AABB, SMALL_NUMBER, Vec3};

/// Contact information produced by a collision test.
///
/// Recomputed for every pair on every solver iteration; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitResult {
    /// Whether the two shapes overlap or touch
    pub is_hit: bool,
    /// Unit contact normal, pointing from the second shape toward the first
    pub normal: Vec3,
    /// Overlap depth along the normal (>= 0 on hit)
    pub penetration: f32,
    /// World-space midpoint of the two surface contact candidates
    pub contact_point: Vec3,
}

impl HitResult {
    /// A result reporting no contact.
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(normal: Vec3, penetration: f32, contact_point: Vec3) -> Self {
        Self {
            is_hit: true,
            normal,
            penetration,
            contact_point,
        }
    }

    /// The same contact seen from the other body.
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// Tests two bodies against each other, dispatching on their shapes.
///
/// Box bodies are treated as axis-aligned (`position ± half_size`); their
/// orientation is ignored.
pub fn test_collision(body_a: &PhysicsBody, body_b: &PhysicsBody) -> HitResult {
    match (body_a.shape, body_b.shape) {
        (Shape::Sphere { radius: radius_a }, Shape::Sphere { radius: radius_b }) => {
            test_sphere_sphere(body_a.position, radius_a, body_b.position, radius_b)
        }
        (Shape::Box { .. }, Shape::Sphere { radius }) => {
            let aabb = body_a.shape.aabb_at(body_a.position);
            // The test reports box -> sphere; flip so it points from B (sphere) to A (box).
            test_sphere_box(body_b.position, radius, &aabb).flipped()
        }
        (Shape::Sphere { radius }, Shape::Box { .. }) => {
            let aabb = body_b.shape.aabb_at(body_b.position);
            test_sphere_box(body_a.position, radius, &aabb)
        }
        (Shape::Box { .. }, Shape::Box { .. }) => HitResult::miss(),
    }
}

/// Tests a sphere against an axis-aligned box.
///
/// The normal points from the box toward the sphere.
///
/// When the sphere center lies outside the box, the contact is taken from the
/// closest box point. When the center is inside, the sphere is pushed out
/// through the nearest face; faces are checked in the order
/// `-X, +X, -Y, +Y, -Z, +Z` and ties keep the earlier face. A sphere buried
/// deeper than its radius does not reach any face and misses.
pub fn test_sphere_box(sphere_center: Vec3, sphere_radius: f32, aabb: &AABB) -> HitResult {
    let closest_on_box = aabb.closest_point(sphere_center);
    let distance_squared = sphere_center.distance_squared(closest_on_box);

    if distance_squared > sphere_radius * sphere_radius {
        return HitResult::miss();
    }

    if distance_squared > SMALL_NUMBER {
        let distance = distance_squared.sqrt();
        let normal = (sphere_center - closest_on_box) / distance;
        let point_on_sphere = sphere_center - normal * sphere_radius;
        return HitResult::hit(
            normal,
            sphere_radius - distance,
            (closest_on_box + point_on_sphere) * 0.5,
        );
    }

    // Center inside the box: find the face with the shortest push-out.
    let faces = [
        (sphere_center.x - aabb.min.x, Vec3::NEG_X),
        (aabb.max.x - sphere_center.x, Vec3::X),
        (sphere_center.y - aabb.min.y, Vec3::NEG_Y),
        (aabb.max.y - sphere_center.y, Vec3::Y),
        (sphere_center.z - aabb.min.z, Vec3::NEG_Z),
        (aabb.max.z - sphere_center.z, Vec3::Z),
    ];
    let (mut push_out, mut normal) = faces[0];
    for &(distance, face_normal) in &faces[1..] {
        if distance < push_out {
            push_out = distance;
            normal = face_normal;
        }
    }

    if push_out > sphere_radius {
        return HitResult::miss();
    }

    let point_on_box = sphere_center + normal * push_out;
    let point_on_sphere = sphere_center + normal * sphere_radius;
    HitResult::hit(
        normal,
        sphere_radius - push_out,
        (point_on_box + point_on_sphere) * 0.5,
    )
}

/// Tests two spheres.
///
/// The normal points from sphere B toward sphere A. Coincident centers report
/// a hit along `+X` with the full radii sum as penetration and the contact at
/// `center_a`.
pub fn test_sphere_sphere(
    center_a: Vec3,
    radius_a: f32,
    center_b: Vec3,
    radius_b: f32,
) -> HitResult {
    let direction = center_a - center_b;
    let distance_squared = direction.length_squared();
    let radii_sum = radius_a + radius_b;

    if distance_squared > radii_sum * radii_sum {
        return HitResult::miss();
    }

    if distance_squared < SMALL_NUMBER {
        return HitResult::hit(Vec3::X, radii_sum, center_a);
    }

    let distance = distance_squared.sqrt();

    let normal = direction / distance;
    let penetration = radii_sum - distance;
    // Midpoint of B's surface point (b + n*rb) and A's (a - n*ra).
    let contact_point = center_b + normal * (radius_b - 0.5 * penetration);
    HitResult::hit(normal, penetration, contact_point)
}
