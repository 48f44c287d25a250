//! Rigid body state
//!
//! A [`PhysicsBody`] is plain data: pose, velocities, shape, mass and material.
//! The integrator and resolver in [`crate::physics::solver`] mutate it in place.
//!
//! Mass is kept private so that the static invariant holds: a static body
//! always reports an inverse mass (and inverse inertia) of zero.

use serde::{Deserialize, Serialize};

use super::shape::Shape;
use super::types::{Quat, Vec3};

/// Material and damping coefficients assigned to a body at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMaterial {
    /// Bounciness in `[0, 1]`; a contact uses the smaller of the two values.
    pub restitution: f32,
    /// Carried for completeness, not used by the resolver.
    pub friction: f32,
    /// Exponential decay rate of linear velocity (1/s).
    pub linear_damping: f32,
    /// Exponential decay rate of angular velocity (1/s).
    pub angular_damping: f32,
}

impl Default for BodyMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.5,
            friction: 0.5,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}

/// A simulated rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Stable identifier, assigned in creation order
    pub id: u32,
    pub shape: Shape,
    /// World-space center (meters)
    pub position: Vec3,
    pub rotation: Quat,
    /// Meters/second
    pub linear_velocity: Vec3,
    /// Radians/second, axis-scaled
    pub angular_velocity: Vec3,
    pub material: BodyMaterial,
    mass: f32,
    inv_mass: f32,
    is_static: bool,
}

static_assertions::assert_impl_all!(PhysicsBody: Copy, Send, Sync);

impl PhysicsBody {
    /// Creates a dynamic body at rest with identity orientation.
    ///
    /// A mass `<= 0` yields an inverse mass of zero: the body keeps
    /// integrating gravity but cannot be pushed by contacts.
    pub fn dynamic(id: u32, shape: Shape, position: Vec3, mass: f32) -> Self {
        Self {
            id,
            shape,
            position,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            material: BodyMaterial::default(),
            mass,
            inv_mass: inverse_mass(mass),
            is_static: false,
        }
    }

    /// Creates an immovable body. Its mass is reported as zero.
    pub fn fixed(id: u32, shape: Shape, position: Vec3) -> Self {
        Self {
            id,
            shape,
            position,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            material: BodyMaterial::default(),
            mass: 0.0,
            inv_mass: 0.0,
            is_static: true,
        }
    }

    pub fn with_linear_velocity(mut self, velocity: Vec3) -> Self {
        if !self.is_static {
            self.linear_velocity = velocity;
        }
        self
    }

    pub fn with_angular_velocity(mut self, velocity: Vec3) -> Self {
        if !self.is_static {
            self.angular_velocity = velocity;
        }
        self
    }

    pub fn with_material(mut self, material: BodyMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// `1 / mass`, or zero for static bodies and non-positive masses.
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Changes the mass of a dynamic body. Ignored for static bodies.
    pub fn set_mass(&mut self, mass: f32) {
        if self.is_static {
            return;
        }
        self.mass = mass;
        self.inv_mass = inverse_mass(mass);
    }

    /// Scalar moment of inertia derived from the shape.
    pub fn moment_of_inertia(&self) -> f32 {
        self.shape.moment_of_inertia(self.mass)
    }

    /// Inverse scalar inertia; zero when the body cannot rotate from contacts.
    pub fn inv_inertia(&self) -> f32 {
        if self.inv_mass == 0.0 {
            return 0.0;
        }
        let inertia = self.moment_of_inertia();
        if inertia > 0.0 { 1.0 / inertia } else { 0.0 }
    }

    /// Velocity of the material point at offset `r` from the center.
    pub fn point_velocity(&self, r: Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(r)
    }

    /// Applies an impulse at offset `r` from the center. No-op for static bodies.
    pub fn apply_impulse(&mut self, impulse: Vec3, r: Vec3) {
        if self.is_static {
            return;
        }
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia();
    }

    /// Linear plus rotational kinetic energy (joules).
    pub fn kinetic_energy(&self) -> f32 {
        if self.is_static {
            return 0.0;
        }
        0.5 * self.mass * self.linear_velocity.length_squared()
            + 0.5 * self.moment_of_inertia() * self.angular_velocity.length_squared()
    }
}

fn inverse_mass(mass: f32) -> f32 {
    if mass > 0.0 { 1.0 / mass } else { 0.0 }
}
