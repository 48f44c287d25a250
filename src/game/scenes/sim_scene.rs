//! SimScene: owns the body collection and drives the fixed-step solver.
//!
//! The scene reacts to exactly two things: [`advance`](SimScene::advance)
//! with a frame delta, and control events (restart, toggle pause). Frame
//! time is accumulated and drained in fixed increments of
//! `1 / simulation_frequency`, so the physics is independent of frame rate.
//! **No rendering imports**; frontends read a [`RenderSnapshot`] after
//! `advance` returns.

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::game::config::{Result, SimulationConfig};
use crate::game::input::ControlEvent;
use crate::game::render::{RenderSnapshot, SimulationObject};
use crate::physics::{AABB, Color, PhysicsBody, Solver, StepStats};
use crate::world::{BodyGenerator, boundary_bodies};

/// Complete simulation scene.
///
/// Created once from a [`SimulationConfig`]. Call
/// [`advance`](SimScene::advance) each frame with the elapsed time; read
/// [`snapshot`](SimScene::snapshot) afterwards for drawing.
#[derive(Debug, Clone)]
pub struct SimScene {
    config: SimulationConfig,
    bodies: Vec<PhysicsBody>,
    objects: Vec<SimulationObject>,
    solver: Solver,
    generator: BodyGenerator,
    world_box: AABB,
    fixed_delta_time: f32,
    accumulator_s: f32,
    paused: bool,
    simulated_time_s: f64,
    step_count: u64,
    last_step: StepStats,
}

impl SimScene {
    /// Validates `config` and generates the initial bodies.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut scene = Self {
            solver: Solver::new(config.solver_settings()),
            generator: BodyGenerator::new(config.random_seed),
            world_box: config.world_box(),
            fixed_delta_time: config.fixed_delta_time(),
            config,
            bodies: Vec::new(),
            objects: Vec::new(),
            accumulator_s: 0.0,
            paused: false,
            simulated_time_s: 0.0,
            step_count: 0,
            last_step: StepStats::default(),
        };
        scene.populate();
        Ok(scene)
    }

    /// Accumulates `delta` seconds and runs as many fixed steps as fit.
    ///
    /// Returns the number of steps run. Does nothing while paused. At most
    /// `max_catch_up_steps` run per call; whole steps beyond that are
    /// dropped (with a warning) and only the fractional remainder is kept.
    /// An infinite `delta` keeps no remainder.
    pub fn advance(&mut self, delta: f32) -> usize {
        if self.paused || !(delta > 0.0) {
            return 0;
        }
        let max_steps = self.config.max_catch_up_steps as usize;
        let pending_s = self.accumulator_s + delta;
        // One step of headroom above the cap so the loop can tell it was cut short.
        self.accumulator_s = pending_s.min((max_steps + 1) as f32 * self.fixed_delta_time);

        let mut steps = 0usize;
        while self.accumulator_s >= self.fixed_delta_time && steps < max_steps {
            self.step();
            self.accumulator_s -= self.fixed_delta_time;
            steps += 1;
        }

        if self.accumulator_s >= self.fixed_delta_time {
            let dropped_s = pending_s - steps as f32 * self.fixed_delta_time;
            self.accumulator_s = if pending_s.is_finite() {
                pending_s % self.fixed_delta_time
            } else {
                0.0
            };
            warn!(
                "[SimScene] Catch-up cap of {} steps reached, dropping {:.3}s",
                max_steps,
                dropped_s - self.accumulator_s
            );
        }
        steps
    }

    /// Runs exactly one fixed step, regardless of the accumulator or pause state.
    pub fn step(&mut self) {
        self.last_step = self.solver.step(&mut self.bodies, self.fixed_delta_time);
        self.simulated_time_s += self.fixed_delta_time as f64;
        self.step_count += 1;
    }

    pub fn handle_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Restart => self.restart(),
            ControlEvent::TogglePause => self.toggle_pause(),
        }
    }

    /// Clears all bodies and objects and regenerates them from the seed.
    ///
    /// The random stream is rewound, so every restart reproduces the same
    /// initial state. Pause state is kept.
    pub fn restart(&mut self) {
        self.generator.reseed(self.config.random_seed);
        self.populate();
    }

    /// Replaces the configuration and restarts with it.
    ///
    /// On a validation error the current scene is left untouched.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.solver = Solver::new(config.solver_settings());
        self.world_box = config.world_box();
        self.fixed_delta_time = config.fixed_delta_time();
        self.config = config;
        self.restart();
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(paused = self.paused, "[SimScene] Pause toggled");
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[PhysicsBody] {
        &self.bodies
    }

    pub fn objects(&self) -> &[SimulationObject] {
        &self.objects
    }

    /// Number of generated balls (excludes the boundary planes).
    pub fn ball_count(&self) -> usize {
        self.bodies.iter().filter(|body| !body.is_static()).count()
    }

    pub fn world_box(&self) -> AABB {
        self.world_box
    }

    pub fn fixed_delta_time(&self) -> f32 {
        self.fixed_delta_time
    }

    /// Time waiting in the accumulator, always below one fixed step after `advance`.
    pub fn pending_time(&self) -> f32 {
        self.accumulator_s
    }

    pub fn simulated_time(&self) -> f64 {
        self.simulated_time_s
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn last_step_stats(&self) -> StepStats {
        self.last_step
    }

    /// Total kinetic energy of all bodies (joules).
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(PhysicsBody::kinetic_energy).sum()
    }

    /// Total linear momentum of all dynamic bodies (kg·m/s).
    pub fn linear_momentum(&self) -> Vec3 {
        self.bodies
            .iter()
            .filter(|body| !body.is_static())
            .map(|body| body.linear_velocity * body.mass())
            .sum()
    }

    /// Copies out everything a renderer needs for this tick.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            time: self.simulated_time_s,
            step_count: self.step_count,
            paused: self.paused,
            world_box: Some(self.world_box),
            ..RenderSnapshot::capture(&self.bodies, &self.objects)
        }
    }

    /// Rebuilds balls and walls. Balls take ids `0..n`, walls follow.
    fn populate(&mut self) {
        self.bodies.clear();
        self.objects.clear();
        self.accumulator_s = 0.0;
        self.simulated_time_s = 0.0;
        self.step_count = 0;
        self.last_step = StepStats::default();

        let balls = self.generator.generate_balls(
            self.config.number_of_balls,
            0,
            &self.config.ball_generation,
            self.config.ball_material(),
        );
        for ball in balls {
            self.objects.push(SimulationObject {
                body_index: self.bodies.len(),
                color: ball.color,
            });
            self.bodies.push(ball.body);
        }

        let first_wall_id = self.bodies.len() as u32;
        for wall in boundary_bodies(&self.world_box, first_wall_id, self.config.boundary_material()) {
            self.objects.push(SimulationObject {
                body_index: self.bodies.len(),
                color: Color::BLACK,
            });
            self.bodies.push(wall);
        }

        info!(
            "[SimScene] Generated {} balls + {} walls (seed {})",
            self.config.number_of_balls,
            self.bodies.len() - self.config.number_of_balls,
            self.generator.seed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WORLD_PLANE_COUNT;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            number_of_balls: 4,
            simulation_frequency: 128,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_new_scene_has_balls_and_walls() {
        let scene = SimScene::new(small_config()).expect("valid config");
        assert_eq!(scene.bodies().len(), 4 + WORLD_PLANE_COUNT);
        assert_eq!(scene.objects().len(), scene.bodies().len());
        assert_eq!(scene.ball_count(), 4);
        for (i, body) in scene.bodies().iter().enumerate() {
            assert_eq!(body.id, i as u32);
        }
        assert!(scene.bodies()[4..].iter().all(PhysicsBody::is_static));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulationConfig {
            simulation_frequency: 0,
            ..SimulationConfig::default()
        };
        assert!(SimScene::new(config).is_err());
    }

    #[test]
    fn test_advance_runs_whole_steps_only() {
        let mut scene = SimScene::new(small_config()).expect("valid config");
        let dt = scene.fixed_delta_time();
        assert_eq!(scene.advance(dt * 0.5), 0);
        assert_eq!(scene.advance(dt * 0.5), 1);
        assert_eq!(scene.advance(dt * 3.0), 3);
        assert_eq!(scene.step_count(), 4);
        assert_eq!(scene.pending_time(), 0.0);
        // 4 balls + 6 walls, minus the 15 wall-wall pairs
        assert_eq!(scene.last_step_stats().pairs, 45 - 15);
    }

    #[test]
    fn test_advance_ignores_non_positive_delta() {
        let mut scene = SimScene::new(small_config()).expect("valid config");
        assert_eq!(scene.advance(0.0), 0);
        assert_eq!(scene.advance(-1.0), 0);
        assert_eq!(scene.advance(f32::NAN), 0);
        assert_eq!(scene.pending_time(), 0.0);
    }

    #[test]
    fn test_catch_up_cap_drops_excess_time() {
        let config = SimulationConfig {
            max_catch_up_steps: 10,
            ..small_config()
        };
        let mut scene = SimScene::new(config).expect("valid config");
        assert_eq!(scene.advance(5.0), 10);
        assert!(scene.pending_time() < scene.fixed_delta_time());
        assert_eq!(scene.step_count(), 10);
    }

    #[test]
    fn test_infinite_delta_is_capped_and_recovers() {
        let mut scene = SimScene::new(small_config()).expect("valid config");
        let max_steps = scene.config().max_catch_up_steps as usize;
        assert_eq!(scene.advance(f32::INFINITY), max_steps);
        assert_eq!(scene.pending_time(), 0.0);

        // Later frames keep stepping normally
        assert_eq!(scene.advance(scene.fixed_delta_time() * 2.0), 2);
        assert_eq!(scene.step_count(), max_steps as u64 + 2);
        assert!(scene.bodies().iter().all(|body| body.position.is_finite()));
    }

    #[test]
    fn test_pause_freezes_bodies() {
        let mut scene = SimScene::new(small_config()).expect("valid config");
        scene.handle_event(ControlEvent::TogglePause);
        let before = scene.bodies().to_vec();
        assert_eq!(scene.advance(1.0), 0);
        assert_eq!(scene.bodies(), &before[..]);
        assert_eq!(scene.pending_time(), 0.0);

        scene.handle_event(ControlEvent::TogglePause);
        assert!(!scene.is_paused());
        assert!(scene.advance(scene.fixed_delta_time()) > 0);
    }

    #[test]
    fn test_restart_reproduces_initial_state() {
        let mut scene = SimScene::new(small_config()).expect("valid config");
        let initial = scene.bodies().to_vec();
        scene.advance(0.5);
        assert_ne!(scene.bodies(), &initial[..]);

        scene.handle_event(ControlEvent::Restart);
        assert_eq!(scene.bodies(), &initial[..]);
        assert_eq!(scene.step_count(), 0);
        assert_eq!(scene.simulated_time(), 0.0);
        assert_eq!(scene.last_step_stats(), StepStats::default());
    }

    #[test]
    fn test_set_config_regenerates() {
        let mut scene = SimScene::new(small_config()).expect("valid config");
        scene
            .set_config(SimulationConfig {
                number_of_balls: 9,
                ..small_config()
            })
            .expect("valid config");
        assert_eq!(scene.ball_count(), 9);

        let bad = SimulationConfig {
            solver_iterations: 0,
            ..small_config()
        };
        assert!(scene.set_config(bad).is_err());
        assert_eq!(scene.ball_count(), 9);
    }

    #[test]
    fn test_snapshot_matches_bodies() {
        let mut scene = SimScene::new(small_config()).expect("valid config");
        scene.advance(0.25);
        let snapshot = scene.snapshot();
        assert_eq!(snapshot.len(), scene.bodies().len());
        assert_eq!(snapshot.step_count, scene.step_count());
        assert_eq!(snapshot.world_box, Some(scene.world_box()));
        for (item, body) in snapshot.items.iter().zip(scene.bodies()) {
            assert_eq!(item.body_id, body.id);
            assert_eq!(item.position, body.position);
            assert_eq!(item.rotation, body.rotation);
        }
        assert_eq!(snapshot.spheres().count(), 4);
    }
}
