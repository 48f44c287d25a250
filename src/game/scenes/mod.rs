//! Scenes Module
//!
//! High-level scene composition. [`SimScene`] owns the bodies and the
//! fixed-step loop.

pub mod sim_scene;

pub use sim_scene::SimScene;
