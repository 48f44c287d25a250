//! Ball Pit Engine Library
//!
//! A small real-time rigid-body simulator: spheres bounce around inside a
//! static world box under gravity, damping and impulse-based contact
//! response, advanced in fixed time steps.
//!
//! # Modules
//!
//! - [`physics`] - Math helpers, shapes, bodies, collision tests and the solver
//! - [`world`] - Boundary planes and seeded ball generation
//! - [`game`] - Configuration, control events, the scene and the render snapshot
//!
//! # Example
//!
//! ```ignore
//! use ball_pit_engine::game::{ControlEvent, SimScene, SimulationConfig};
//!
//! let mut scene = SimScene::new(SimulationConfig::default())?;
//!
//! // Each frame: feed the elapsed time, then draw the snapshot
//! scene.advance(1.0 / 60.0);
//! for item in scene.snapshot().spheres() {
//!     println!("{} at {:?}", item.body_id, item.position);
//! }
//!
//! // Keyboard 'R'
//! scene.handle_event(ControlEvent::Restart);
//! ```

pub mod physics;
pub mod world;

// Scene-level modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the most used types at crate level for convenience
pub use game::{ControlEvent, Frontend, RenderSnapshot, SimScene, SimulationConfig};
pub use physics::{HitResult, PhysicsBody, Shape};
