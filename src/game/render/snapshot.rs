//! Render Snapshot
//!
//! What the renderer is allowed to see: one `(shape, pose, color)` entry per
//! body, copied out after `advance` returns. Nothing here aliases live
//! physics state.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::{AABB, Color, PhysicsBody, Shape};

/// A drawable thing: an index into the scene's body array plus a color.
///
/// Never owns physics state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationObject {
    pub body_index: usize,
    pub color: Color,
}

/// One body as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub body_id: u32,
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Quat,
    pub color: Color,
}

/// Read-only view of the scene after a tick.
///
/// Item order follows the scene's object list and is stable within a tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Simulated seconds since the last (re)start
    pub time: f64,
    pub step_count: u64,
    pub paused: bool,
    /// Wireframe bounds of the world
    pub world_box: Option<AABB>,
    pub items: Vec<RenderItem>,
}

static_assertions::assert_impl_all!(RenderSnapshot: Send, Sync);

impl RenderSnapshot {
    /// Pairs every object with the body it points at.
    ///
    /// Objects whose index is out of range are skipped.
    pub fn capture(bodies: &[PhysicsBody], objects: &[SimulationObject]) -> Self {
        let items = objects
            .iter()
            .filter_map(|object| {
                bodies.get(object.body_index).map(|body| RenderItem {
                    body_id: body.id,
                    shape: body.shape,
                    position: body.position,
                    rotation: body.rotation,
                    color: object.color,
                })
            })
            .collect();
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items drawn as spheres (everything but the boundary planes).
    pub fn spheres(&self) -> impl Iterator<Item = &RenderItem> {
        self.items.iter().filter(|item| item.shape.is_sphere())
    }
}
