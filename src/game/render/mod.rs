//! Render Module
//!
//! The boundary between the simulation and whatever draws it: snapshots of
//! body poses and the per-frame frontend contract. No GPU code lives here.

pub mod frontend;
pub mod snapshot;

pub use frontend::{Frontend, ScriptedFrontend, run_frame};
pub use snapshot::{RenderItem, RenderSnapshot, SimulationObject};
