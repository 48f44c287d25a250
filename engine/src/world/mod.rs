//! World Module
//!
//! Builds the contents of a simulation world: the static boundary planes
//! around the world box and the seeded, randomly generated balls inside it.

pub mod bounds;
pub mod generation;

pub use bounds::{WORLD_PLANE_COUNT, boundary_bodies, world_planes};
pub use generation::{BallGenerationParams, BodyGenerator, GeneratedBall};
