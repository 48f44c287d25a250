//! World Bounds
//!
//! Turns the world bounding box into six zero-thickness static box bodies so
//! the walls go through the same pair-resolution path as everything else.

use glam::Vec3;

use crate::physics::{AABB, BodyMaterial, PhysicsBody, Shape};

/// Number of boundary planes around the world box.
pub const WORLD_PLANE_COUNT: usize = 6;

/// The six faces of `world_box` as flat boxes.
///
/// Order: left (x = min), right (x = max), bottom (y = min), top (y = max),
/// front (z = min), back (z = max). Each plane covers the full extent of the
/// other two axes.
pub fn world_planes(world_box: &AABB) -> [AABB; WORLD_PLANE_COUNT] {
    let AABB { min, max } = *world_box;
    [
        AABB::new(min, Vec3::new(min.x, max.y, max.z)),
        AABB::new(Vec3::new(max.x, min.y, min.z), max),
        AABB::new(min, Vec3::new(max.x, min.y, max.z)),
        AABB::new(Vec3::new(min.x, max.y, min.z), max),
        AABB::new(min, Vec3::new(max.x, max.y, min.z)),
        AABB::new(Vec3::new(min.x, min.y, max.z), max),
    ]
}

/// Static bodies for the six world planes, with ids starting at `first_id`.
pub fn boundary_bodies(
    world_box: &AABB,
    first_id: u32,
    material: BodyMaterial,
) -> [PhysicsBody; WORLD_PLANE_COUNT] {
    let planes = world_planes(world_box);
    std::array::from_fn(|i| {
        let plane = planes[i];
        PhysicsBody::fixed(
            first_id + i as u32,
            Shape::cuboid(plane.size() * 0.5),
            plane.center(),
        )
        .with_material(material)
    })
}
