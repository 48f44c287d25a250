//! Seeded ball generation.
//!
//! [`BodyGenerator`] owns its random stream; the same seed and parameters
//! always produce the same sequence of balls. Per ball the draws happen in a
//! fixed order: location x, y, z; linear velocity x, y, z; radius; angular
//! velocity x, y, z.

use glam::Vec3;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::{BodyMaterial, Color, PhysicsBody, Shape};

/// Sampling ranges for randomly generated balls.
///
/// Every range is inclusive and requires `min <= max` per component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallGenerationParams {
    pub min_location: Vec3,
    pub max_location: Vec3,
    pub min_linear_velocity: Vec3,
    pub max_linear_velocity: Vec3,
    pub min_angular_velocity: Vec3,
    pub max_angular_velocity: Vec3,
    pub min_radius: f32,
    pub max_radius: f32,
    /// `mass = radius * mass_to_radius`
    pub mass_to_radius: f32,
}

impl Default for BallGenerationParams {
    fn default() -> Self {
        Self {
            min_location: Vec3::new(-5.0, 5.0, -5.0),
            max_location: Vec3::new(5.0, 5.0, 5.0),
            min_linear_velocity: Vec3::splat(-2.5),
            max_linear_velocity: Vec3::splat(2.5),
            min_angular_velocity: Vec3::splat(-2.0),
            max_angular_velocity: Vec3::splat(2.0),
            min_radius: 0.5,
            max_radius: 1.0,
            mass_to_radius: 10.0,
        }
    }
}

impl BallGenerationParams {
    /// Color blend factor for `radius`: 0 at `min_radius`, 1 at `max_radius`.
    pub fn radius_fraction(&self, radius: f32) -> f32 {
        let span = self.max_radius - self.min_radius;
        if span > 0.0 {
            (radius - self.min_radius) / span
        } else {
            0.0
        }
    }
}

/// A freshly generated ball and the color it should be drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratedBall {
    pub body: PhysicsBody,
    pub color: Color,
}

/// Procedural ball generator with seeded randomness.
#[derive(Debug, Clone)]
pub struct BodyGenerator {
    seed: u64,
    rng: StdRng,
}

impl BodyGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds the random stream to the state right after construction.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Generates one dynamic sphere.
    ///
    /// Balls are tinted from green (smallest radius) to red (largest).
    pub fn generate_ball(
        &mut self,
        id: u32,
        params: &BallGenerationParams,
        material: BodyMaterial,
    ) -> GeneratedBall {
        let position = self.sample_vec3(params.min_location, params.max_location);
        let linear_velocity =
            self.sample_vec3(params.min_linear_velocity, params.max_linear_velocity);
        let radius = self.rng.gen_range(params.min_radius..=params.max_radius);
        let angular_velocity =
            self.sample_vec3(params.min_angular_velocity, params.max_angular_velocity);

        let body = PhysicsBody::dynamic(
            id,
            Shape::sphere(radius),
            position,
            radius * params.mass_to_radius,
        )
        .with_linear_velocity(linear_velocity)
        .with_angular_velocity(angular_velocity)
        .with_material(material);

        GeneratedBall {
            body,
            color: Color::lerp(Color::GREEN, Color::RED, params.radius_fraction(radius)),
        }
    }

    /// Generates `count` balls with ids `first_id..first_id + count`.
    pub fn generate_balls(
        &mut self,
        count: usize,
        first_id: u32,
        params: &BallGenerationParams,
        material: BodyMaterial,
    ) -> Vec<GeneratedBall> {
        (0..count)
            .map(|i| self.generate_ball(first_id + i as u32, params, material))
            .collect()
    }

    fn sample_vec3(&mut self, min: Vec3, max: Vec3) -> Vec3 {
        let x = self.rng.gen_range(min.x..=max.x);
        let y = self.rng.gen_range(min.y..=max.y);
        let z = self.rng.gen_range(min.z..=max.z);
        Vec3::new(x, y, z)
    }
}
