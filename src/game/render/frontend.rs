//! Frontend collaborator
//!
//! A frontend owns the window, input and drawing. Once per frame it hands the
//! scene a delta time and any control events, then receives a snapshot to
//! draw. [`ScriptedFrontend`] replays a fixed frame rate with scheduled events
//! and is what the headless binary and the tests drive.

use std::collections::BTreeMap;

use super::snapshot::RenderSnapshot;
use crate::game::input::ControlEvent;
use crate::game::scenes::SimScene;

/// Per-frame interface between a scene and whatever displays it.
pub trait Frontend {
    /// Seconds elapsed since the previous frame (>= 0).
    fn delta_time(&mut self) -> f32;

    /// Control events raised since the previous frame, in order.
    fn poll_events(&mut self) -> Vec<ControlEvent>;

    /// Draw the quiesced scene state.
    fn present(&mut self, snapshot: &RenderSnapshot);
}

/// Runs one frame: events first, then `advance`, then `present`.
///
/// Returns the number of fixed steps that ran.
pub fn run_frame<F: Frontend + ?Sized>(scene: &mut SimScene, frontend: &mut F) -> usize {
    for event in frontend.poll_events() {
        scene.handle_event(event);
    }
    let steps = scene.advance(frontend.delta_time());
    frontend.present(&scene.snapshot());
    steps
}

/// Frontend that plays back a constant frame time and a schedule of events.
#[derive(Debug, Clone)]
pub struct ScriptedFrontend {
    frame_time: f32,
    frame: u64,
    schedule: BTreeMap<u64, Vec<ControlEvent>>,
    last_snapshot: Option<RenderSnapshot>,
    frames_presented: u64,
}

impl ScriptedFrontend {
    pub fn new(frame_time: f32) -> Self {
        Self {
            frame_time: frame_time.max(0.0),
            frame: 0,
            schedule: BTreeMap::new(),
            last_snapshot: None,
            frames_presented: 0,
        }
    }

    /// Raise `event` at the start of frame `frame` (0-based).
    pub fn schedule(&mut self, frame: u64, event: ControlEvent) {
        self.schedule.entry(frame).or_default().push(event);
    }

    pub fn with_event(mut self, frame: u64, event: ControlEvent) -> Self {
        self.schedule(frame, event);
        self
    }

    /// Index of the frame that will run next.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_snapshot(&self) -> Option<&RenderSnapshot> {
        self.last_snapshot.as_ref()
    }
}

impl Frontend for ScriptedFrontend {
    fn delta_time(&mut self) -> f32 {
        self.frame_time
    }

    fn poll_events(&mut self) -> Vec<ControlEvent> {
        self.schedule.remove(&self.frame).unwrap_or_default()
    }

    fn present(&mut self, snapshot: &RenderSnapshot) {
        self.last_snapshot = Some(snapshot.clone());
        self.frames_presented += 1;
        self.frame += 1;
    }
}
