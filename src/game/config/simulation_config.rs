//! Simulation Configuration
//!
//! Every tunable of the ball pit in one place. Consumed when a scene is
//! created or restarted; changing it mid-run has no effect until then.
//! `Default` matches the stock scene: 30 balls, 120 Hz, 8 solver sweeps.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};
use crate::physics::{AABB, BodyMaterial, SolverSettings};
use crate::world::BallGenerationParams;

/// Configuration for the whole simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed steps per simulated second
    pub simulation_frequency: u32,
    /// Contact resolution sweeps per fixed step
    pub solver_iterations: u32,
    pub number_of_balls: usize,
    pub random_seed: u64,
    /// Penetration left uncorrected to avoid jitter (meters)
    pub slop: f32,
    /// Downward gravitational acceleration magnitude (m/s²)
    pub gravity: f32,
    pub ball_restitution: f32,
    pub ball_friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Wall bounciness; contacts use the smaller of wall and ball values
    pub boundary_restitution: f32,
    pub boundary_friction: f32,
    pub world_box_min: Vec3,
    pub world_box_max: Vec3,
    /// Upper bound on fixed steps per `advance` call
    pub max_catch_up_steps: u32,
    pub ball_generation: BallGenerationParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulation_frequency: 120,
            solver_iterations: 8,
            number_of_balls: 30,
            random_seed: 1337,
            slop: 0.0005,
            gravity: 9.81,
            ball_restitution: 0.3,
            ball_friction: 0.2,
            linear_damping: 0.1,
            angular_damping: 0.2,
            boundary_restitution: 1.0,
            boundary_friction: 0.5,
            world_box_min: Vec3::splat(-7.5),
            world_box_max: Vec3::splat(7.5),
            max_catch_up_steps: 120,
            ball_generation: BallGenerationParams::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON document. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the solver cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.simulation_frequency == 0 {
            return Err(ConfigError::invalid("simulation_frequency", "must be positive"));
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::invalid("solver_iterations", "must be at least 1"));
        }
        if self.max_catch_up_steps == 0 {
            return Err(ConfigError::invalid("max_catch_up_steps", "must be at least 1"));
        }
        if !(self.slop >= 0.0) {
            return Err(ConfigError::invalid("slop", "must be >= 0"));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::invalid("gravity", "must be finite"));
        }
        check_unit_interval("ball_restitution", self.ball_restitution)?;
        check_unit_interval("boundary_restitution", self.boundary_restitution)?;
        for (field, value) in [
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, "must be >= 0"));
            }
        }
        if !self.world_box().is_valid() {
            return Err(ConfigError::invalid("world_box_min", "must not exceed world_box_max"));
        }

        let generation = &self.ball_generation;
        check_range("ball_generation.location", generation.min_location, generation.max_location)?;
        check_range(
            "ball_generation.linear_velocity",
            generation.min_linear_velocity,
            generation.max_linear_velocity,
        )?;
        check_range(
            "ball_generation.angular_velocity",
            generation.min_angular_velocity,
            generation.max_angular_velocity,
        )?;
        if !(generation.min_radius > 0.0) || !(generation.min_radius <= generation.max_radius) {
            return Err(ConfigError::invalid(
                "ball_generation.radius",
                format!(
                    "need 0 < min_radius <= max_radius, got [{}, {}]",
                    generation.min_radius, generation.max_radius
                ),
            ));
        }
        if !generation.max_radius.is_finite() {
            return Err(ConfigError::invalid("ball_generation.radius", "must be finite"));
        }
        if !(generation.mass_to_radius > 0.0) {
            return Err(ConfigError::invalid("ball_generation.mass_to_radius", "must be positive"));
        }
        Ok(())
    }

    /// `1 / simulation_frequency` seconds.
    pub fn fixed_delta_time(&self) -> f32 {
        1.0 / self.simulation_frequency as f32
    }

    pub fn world_box(&self) -> AABB {
        AABB::new(self.world_box_min, self.world_box_max)
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            gravity: Vec3::new(0.0, -self.gravity, 0.0),
            slop: self.slop,
            iterations: self.solver_iterations,
        }
    }

    pub fn ball_material(&self) -> BodyMaterial {
        BodyMaterial {
            restitution: self.ball_restitution,
            friction: self.ball_friction,
            linear_damping: self.linear_damping,
            angular_damping: self.angular_damping,
        }
    }

    pub fn boundary_material(&self) -> BodyMaterial {
        BodyMaterial {
            restitution: self.boundary_restitution,
            friction: self.boundary_friction,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}

fn check_unit_interval(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

fn check_range(field: &'static str, min: Vec3, max: Vec3) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::invalid(field, "must be finite"));
    }
    if !min.cmple(max).all() {
        return Err(ConfigError::invalid(
            field,
            format!("min {min:?} exceeds max {max:?}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.fixed_delta_time() - 1.0 / 120.0).abs() < 1e-9);
        assert_eq!(config.solver_settings().gravity, Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{ "number_of_balls": 5, "random_seed": 9, "ball_generation": { "max_radius": 0.8 } }"#,
        )
        .expect("valid config");
        assert_eq!(config.number_of_balls, 5);
        assert_eq!(config.random_seed, 9);
        assert_eq!(config.simulation_frequency, 120);
        assert_eq!(config.ball_generation.max_radius, 0.8);
        assert_eq!(config.ball_generation.min_radius, 0.5);
    }

    #[test]
    fn test_json_round_trip_preserves_config() {
        let config = SimulationConfig {
            world_box_min: Vec3::new(-1.0, -2.0, -3.0),
            ..SimulationConfig::default()
        };
        let json = config.to_json_pretty().expect("serializable");
        assert_eq!(SimulationConfig::from_json_str(&json).expect("parse"), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases: Vec<(&str, SimulationConfig)> = vec![
            (
                "simulation_frequency",
                SimulationConfig { simulation_frequency: 0, ..Default::default() },
            ),
            (
                "solver_iterations",
                SimulationConfig { solver_iterations: 0, ..Default::default() },
            ),
            ("slop", SimulationConfig { slop: -1.0, ..Default::default() }),
            (
                "ball_restitution",
                SimulationConfig { ball_restitution: 1.5, ..Default::default() },
            ),
            (
                "world_box_min",
                SimulationConfig { world_box_min: Vec3::splat(10.0), ..Default::default() },
            ),
            (
                "ball_generation.radius",
                SimulationConfig {
                    ball_generation: BallGenerationParams {
                        min_radius: 2.0,
                        max_radius: 1.0,
                        ..Default::default()
                    },
                    ..Default::default()
                },
            ),
        ];
        for (expected_field, config) in cases {
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected {expected_field} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            SimulationConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            SimulationConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
