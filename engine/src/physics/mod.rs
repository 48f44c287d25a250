//! Physics module for the ball pit engine
//!
//! Rigid spheres and static boxes under gravity, damping and contact
//! response. Built from scratch without an external physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Vec3/Quat re-exported from glam, plus AABB and Color helpers
//! - [`shape`] - Box/Sphere shape enum and scalar moment of inertia
//! - [`body`] - Rigid body state and material
//! - [`collision`] - Sphere-sphere and sphere-box narrow phase
//! - [`broad_phase`] - Candidate pair enumeration
//! - [`solver`] - Fixed-step integrator and iterative contact resolver

pub mod body;
pub mod broad_phase;
pub mod collision;
pub mod shape;
pub mod solver;
pub mod types;

// Re-export commonly used types at the physics module level
pub use body::{BodyMaterial, PhysicsBody};
pub use broad_phase::{BroadPhase, BruteForcePairs, CollisionPair};
pub use collision::{HitResult, test_collision, test_sphere_box, test_sphere_sphere};
pub use shape::Shape;
pub use solver::{Solver, SolverSettings, StepStats, resolve_collision_pair};
pub use types::{AABB, Color, Quat, Vec3};
