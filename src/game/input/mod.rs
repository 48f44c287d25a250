//! Input Module
//!
//! Control event definitions and keyboard mapping.

pub mod actions;
pub mod keyboard;

pub use actions::{ControlEvent, UnknownEvent};
pub use keyboard::map_key_to_event;
