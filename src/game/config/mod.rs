//! Config Module
//!
//! Centralized configuration for the simulation and its error type.

pub mod error;
pub mod simulation_config;

pub use error::{ConfigError, Result};
pub use simulation_config::SimulationConfig;
