//! Game Module
//!
//! Scene-level code that builds on the engine's physics and world modules:
//! configuration, control events, the simulation scene and the render
//! boundary.

pub mod config;
pub mod input;
pub mod render;
pub mod scenes;

pub use config::{ConfigError, SimulationConfig};
pub use input::{ControlEvent, map_key_to_event};
pub use render::{Frontend, RenderItem, RenderSnapshot, ScriptedFrontend, SimulationObject, run_frame};
pub use scenes::SimScene;
