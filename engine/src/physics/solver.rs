//! Fixed-step integration and iterative contact resolution.
//!
//! One [`Solver::step`] runs:
//! 1. [`integrate_forces`]: gravity, exponential damping, semi-implicit Euler
//!    position update and quaternion spin for every dynamic body.
//! 2. [`resolve_collisions`]: `iterations` Gauss-Seidel sweeps over every
//!    candidate pair, each applying positional correction followed by a
//!    normal impulse.
//!
//! More sweeps settle stacked contacts (a ball resting on two others) better,
//! at a cost of `O(iterations · pairs)` per step.

use super::body::PhysicsBody;
use super::broad_phase::{BroadPhase, BruteForcePairs, CollisionPair};
use super::collision::test_collision;
use super::types::{KINDA_SMALL_NUMBER, Quat, Vec3};

/// Tunable solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Gravitational acceleration (m/s²)
    pub gravity: Vec3,
    /// Penetration allowance that is never corrected (meters)
    pub slop: f32,
    /// Resolution sweeps per step
    pub iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            slop: 0.0005,
            iterations: 8,
        }
    }
}

/// Per-step counters, mostly for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Candidate pairs handed to the narrow phase
    pub pairs: usize,
    /// Contacts found across all sweeps
    pub contacts: usize,
}

/// Step engine: owns the broad phase and a reusable pair buffer.
#[derive(Debug, Clone)]
pub struct Solver<B: BroadPhase = BruteForcePairs> {
    pub settings: SolverSettings,
    broad_phase: B,
    pairs: Vec<CollisionPair>,
}

impl Solver<BruteForcePairs> {
    pub fn new(settings: SolverSettings) -> Self {
        Self::with_broad_phase(settings, BruteForcePairs)
    }
}

impl<B: BroadPhase> Solver<B> {
    pub fn with_broad_phase(settings: SolverSettings, broad_phase: B) -> Self {
        Self {
            settings,
            broad_phase,
            pairs: Vec::new(),
        }
    }

    /// Advances `bodies` by exactly `dt` seconds.
    pub fn step(&mut self, bodies: &mut [PhysicsBody], dt: f32) -> StepStats {
        integrate_forces(bodies, self.settings.gravity, dt);

        self.broad_phase.collect_pairs(bodies, &mut self.pairs);
        let contacts = resolve_collisions(
            bodies,
            &self.pairs,
            self.settings.iterations,
            self.settings.slop,
        );

        StepStats {
            pairs: self.pairs.len(),
            contacts,
        }
    }
}

/// Integrates every dynamic body over `dt`. Static bodies are left untouched.
pub fn integrate_forces(bodies: &mut [PhysicsBody], gravity: Vec3, dt: f32) {
    for body in bodies.iter_mut().filter(|b| !b.is_static()) {
        integrate_body(body, gravity, dt);
    }
}

/// Integrates a single body.
///
/// - `v += g·dt`, then `v *= e^(-linear_damping·dt)`
/// - `x += v·dt` (semi-implicit: uses the updated velocity)
/// - orientation is pre-multiplied by the axis-angle increment `(ω̂, |ω|·dt)`
///   and renormalized, skipped when `|ω|` is near zero
/// - `ω *= e^(-angular_damping·dt)`
pub fn integrate_body(body: &mut PhysicsBody, gravity: Vec3, dt: f32) {
    if body.is_static() {
        return;
    }

    body.linear_velocity += gravity * dt;
    body.linear_velocity *= (-body.material.linear_damping * dt).exp();
    body.position += body.linear_velocity * dt;

    let angular_speed = body.angular_velocity.length();
    if angular_speed > KINDA_SMALL_NUMBER {
        let axis = body.angular_velocity / angular_speed;
        let delta = Quat::from_axis_angle(axis, angular_speed * dt);
        body.rotation = (delta * body.rotation).normalize();
    }
    body.angular_velocity *= (-body.material.angular_damping * dt).exp();
}

/// Runs `iterations` sweeps of [`resolve_collision_pair`] over `pairs`.
///
/// Returns the number of contacts found across all sweeps.
pub fn resolve_collisions(
    bodies: &mut [PhysicsBody],
    pairs: &[CollisionPair],
    iterations: u32,
    slop: f32,
) -> usize {
    let mut contacts = 0;
    for _ in 0..iterations {
        for &(i, j) in pairs {
            let Some((a, b)) = pair_mut(bodies, i, j) else {
                continue;
            };
            if resolve_collision_pair(a, b, slop) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Resolves one contact between `a` and `b`. Returns whether they touched.
///
/// Positional correction moves the bodies apart along the contact normal by
/// the penetration beyond `slop`, split by inverse mass. The normal impulse
/// is applied only while the bodies approach each other, with restitution
/// `min(a, b)`. Angular response uses the scalar moment of inertia. Static
/// bodies are never moved.
pub fn resolve_collision_pair(a: &mut PhysicsBody, b: &mut PhysicsBody, slop: f32) -> bool {
    if a.is_static() && b.is_static() {
        return false;
    }

    let hit = test_collision(a, b);
    if !hit.is_hit {
        return false;
    }

    let inv_mass_sum = a.inv_mass() + b.inv_mass();
    if inv_mass_sum <= 0.0 {
        // Nothing here can be pushed; an impulse would divide by zero.
        return true;
    }

    let normal = hit.normal;
    let r_a = hit.contact_point - a.position;
    let r_b = hit.contact_point - b.position;

    let penetration = (hit.penetration - slop).max(0.0);
    if penetration > 0.0 {
        let correction = normal * (penetration / inv_mass_sum);
        if !a.is_static() {
            a.position += correction * a.inv_mass();
        }
        if !b.is_static() {
            b.position -= correction * b.inv_mass();
        }
    }

    let relative_velocity = a.point_velocity(r_a) - b.point_velocity(r_b);
    let velocity_along_normal = relative_velocity.dot(normal);
    if velocity_along_normal >= 0.0 {
        return true;
    }

    let angular_a = a.inv_inertia() * r_a.cross(normal).length_squared();
    let angular_b = b.inv_inertia() * r_b.cross(normal).length_squared();
    let denominator = inv_mass_sum + angular_a + angular_b;

    let restitution = a.material.restitution.min(b.material.restitution);
    let impulse_magnitude = (1.0 + restitution) * -velocity_along_normal / denominator;
    let impulse = normal * impulse_magnitude;

    a.apply_impulse(impulse, r_a);
    b.apply_impulse(-impulse, r_b);
    true
}

/// Two distinct mutable bodies out of one slice.
fn pair_mut(
    bodies: &mut [PhysicsBody],
    i: usize,
    j: usize,
) -> Option<(&mut PhysicsBody, &mut PhysicsBody)> {
    if i == j || i.max(j) >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyMaterial;
    use crate::physics::shape::Shape;
    use approx::assert_relative_eq;

    fn ball(id: u32, position: Vec3, velocity: Vec3) -> PhysicsBody {
        PhysicsBody::dynamic(id, Shape::sphere(1.0), position, 1.0)
            .with_linear_velocity(velocity)
            .with_material(BodyMaterial {
                restitution: 1.0,
                ..BodyMaterial::default()
            })
    }

    #[test]
    fn test_integrate_gravity_semi_implicit() {
        let mut body = ball(0, Vec3::ZERO, Vec3::ZERO);
        integrate_body(&mut body, Vec3::new(0.0, -10.0, 0.0), 0.5);
        assert_relative_eq!(body.linear_velocity.y, -5.0);
        assert_relative_eq!(body.position.y, -2.5);
    }

    #[test]
    fn test_integrate_linear_damping_is_exponential() {
        let mut body = ball(0, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        body.material.linear_damping = 0.5;
        integrate_body(&mut body, Vec3::ZERO, 2.0);
        assert_relative_eq!(body.linear_velocity.x, 2.0 * (-1.0f32).exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_integrate_rotation_stays_normalized() {
        let mut body = ball(0, Vec3::ZERO, Vec3::ZERO).with_angular_velocity(Vec3::new(0.0, 3.0, 0.0));
        for _ in 0..1000 {
            integrate_body(&mut body, Vec3::ZERO, 1.0 / 120.0);
        }
        assert_relative_eq!(body.rotation.length(), 1.0, epsilon = 1e-5);
        assert!(body.rotation != Quat::IDENTITY);
    }

    #[test]
    fn test_integrate_quarter_turn() {
        let mut body = ball(0, Vec3::ZERO, Vec3::ZERO)
            .with_angular_velocity(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        integrate_body(&mut body, Vec3::ZERO, 1.0);
        let rotated = body.rotation * Vec3::X;
        assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_integrate_skips_static() {
        let mut bodies = [PhysicsBody::fixed(0, Shape::cuboid(Vec3::ONE), Vec3::ZERO)];
        integrate_forces(&mut bodies, Vec3::new(0.0, -9.81, 0.0), 1.0);
        assert_eq!(bodies[0].position, Vec3::ZERO);
        assert_eq!(bodies[0].linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_elastic_head_on_collision_swaps_velocities() {
        let mut a = ball(0, Vec3::new(1.9, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let mut b = ball(1, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!(resolve_collision_pair(&mut a, &mut b, 0.0));
        assert_relative_eq!(a.linear_velocity.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(b.linear_velocity.x, -1.0, epsilon = 1e-5);
        // Equal masses split the 0.1 overlap evenly
        assert_relative_eq!(a.position.x, 1.95, epsilon = 1e-5);
        assert_relative_eq!(b.position.x, -0.05, epsilon = 1e-5);
        // Sphere contacts are central: no spin
        assert_relative_eq!(a.angular_velocity.length(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_restitution_uses_smaller_value() {
        let mut floor = PhysicsBody::fixed(0, Shape::cuboid(Vec3::new(5.0, 0.0, 5.0)), Vec3::ZERO)
            .with_material(BodyMaterial {
                restitution: 0.9,
                ..BodyMaterial::default()
            });
        let mut falling = ball(1, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0));
        falling.material.restitution = 0.2;

        assert!(resolve_collision_pair(&mut floor, &mut falling, 0.0));
        assert_relative_eq!(falling.linear_velocity.y, 0.4, epsilon = 1e-5);

        // Order of the pair does not change the rule
        let mut falling = ball(1, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0));
        falling.material.restitution = 0.2;
        assert!(resolve_collision_pair(&mut falling, &mut floor, 0.0));
        assert_relative_eq!(falling.linear_velocity.y, 0.4, epsilon = 1e-5);
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let mut a = ball(0, Vec3::new(1.9, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let mut b = ball(1, Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        resolve_collision_pair(&mut a, &mut b, 0.0);
        assert_eq!(a.linear_velocity.x, 1.0);
        assert_eq!(b.linear_velocity.x, -1.0);
    }

    #[test]
    fn test_slop_suppresses_small_corrections() {
        let mut a = ball(0, Vec3::new(1.999, 0.0, 0.0), Vec3::ZERO);
        let mut b = ball(1, Vec3::ZERO, Vec3::ZERO);
        resolve_collision_pair(&mut a, &mut b, 0.01);
        assert_eq!(a.position.x, 1.999);
        assert_eq!(b.position.x, 0.0);
    }

    #[test]
    fn test_static_body_absorbs_nothing() {
        let mut floor = PhysicsBody::fixed(0, Shape::cuboid(Vec3::new(5.0, 0.0, 5.0)), Vec3::ZERO);
        let mut falling = ball(1, Vec3::new(0.0, 0.8, 0.0), Vec3::new(0.0, -2.0, 0.0));
        falling.material.restitution = 0.5;

        assert!(resolve_collision_pair(&mut floor, &mut falling, 0.0));
        assert_eq!(floor.position, Vec3::ZERO);
        assert_eq!(floor.linear_velocity, Vec3::ZERO);
        assert_relative_eq!(falling.position.y, 1.0, epsilon = 1e-5);
        // Restitution is min(0.5, floor default 0.5)
        assert_relative_eq!(falling.linear_velocity.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_static_pair_is_skipped() {
        let mut a = PhysicsBody::fixed(0, Shape::sphere(1.0), Vec3::ZERO);
        let mut b = PhysicsBody::fixed(1, Shape::sphere(1.0), Vec3::new(0.5, 0.0, 0.0));
        assert!(!resolve_collision_pair(&mut a, &mut b, 0.0));
        assert_eq!(a.position, Vec3::ZERO);
        assert_eq!(b.position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_zero_inverse_mass_pair_is_noop() {
        let mut a = PhysicsBody::dynamic(0, Shape::sphere(1.0), Vec3::ZERO, 0.0)
            .with_linear_velocity(Vec3::X);
        let mut b = PhysicsBody::fixed(1, Shape::sphere(1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(resolve_collision_pair(&mut a, &mut b, 0.0));
        assert_eq!(a.position, Vec3::ZERO);
        assert_eq!(a.linear_velocity, Vec3::X);
        assert!(a.linear_velocity.is_finite());
    }

    #[test]
    fn test_solver_step_settles_ball_on_floor() {
        let mut bodies = vec![
            PhysicsBody::fixed(0, Shape::cuboid(Vec3::new(10.0, 0.0, 10.0)), Vec3::ZERO),
            PhysicsBody::dynamic(1, Shape::sphere(0.5), Vec3::new(0.0, 2.0, 0.0), 5.0).with_material(
                BodyMaterial {
                    restitution: 0.3,
                    friction: 0.2,
                    linear_damping: 0.1,
                    angular_damping: 0.2,
                },
            ),
        ];
        let mut solver = Solver::new(SolverSettings::default());
        for _ in 0..(120 * 5) {
            solver.step(&mut bodies, 1.0 / 120.0);
        }
        let ball = &bodies[1];
        assert!((ball.position.y - 0.5).abs() < 0.01, "ball rests at y={}", ball.position.y);
        assert!(ball.linear_velocity.length() < 0.2);
        assert_eq!(bodies[0].position, Vec3::ZERO);
    }

    #[test]
    fn test_step_stats_counts_pairs() {
        let mut bodies = vec![
            ball(0, Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO),
            ball(1, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO),
            ball(2, Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO),
        ];
        let mut solver = Solver::new(SolverSettings {
            gravity: Vec3::ZERO,
            slop: 0.0,
            iterations: 4,
        });
        let stats = solver.step(&mut bodies, 0.01);
        assert_eq!(stats, StepStats { pairs: 3, contacts: 0 });
    }

    #[test]
    fn test_pair_mut_rejects_aliasing() {
        let mut bodies = vec![ball(0, Vec3::ZERO, Vec3::ZERO), ball(1, Vec3::X, Vec3::ZERO)];
        assert!(pair_mut(&mut bodies, 0, 0).is_none());
        assert!(pair_mut(&mut bodies, 0, 5).is_none());
        let (second, first) = pair_mut(&mut bodies, 1, 0).expect("distinct indices");
        assert_eq!(second.id, 1);
        assert_eq!(first.id, 0);
    }
}
